//! Onboarding step machine and accumulated profile form.
//!
//! New users walk a strictly linear flow: `welcome → profile → preferences`,
//! terminating in `complete`. Each step persists an idempotent
//! per-`(user, step)` record; the machine itself is pure and holds the pair
//! `(current step, accumulated form data)`. `complete` is terminal — no
//! transition leaves it, and reaching it is the only thing that flips a
//! profile's `onboarding_completed` flag.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A named step of the onboarding flow, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    Welcome,
    Profile,
    Preferences,
    Complete,
}

impl OnboardingStep {
    /// All steps in flow order. `complete` is last and terminal.
    pub const ALL: [OnboardingStep; 4] = [
        OnboardingStep::Welcome,
        OnboardingStep::Profile,
        OnboardingStep::Preferences,
        OnboardingStep::Complete,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OnboardingStep::Welcome => "welcome",
            OnboardingStep::Profile => "profile",
            OnboardingStep::Preferences => "preferences",
            OnboardingStep::Complete => "complete",
        }
    }

    /// Validate a step name against the catalog, returning a descriptive
    /// error if unknown.
    pub fn parse(name: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid onboarding step '{name}'. Must be one of: \
                     welcome, profile, preferences, complete"
                ))
            })
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }
}

/// Download quality preference captured during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadQuality {
    High,
    Medium,
    Original,
}

/// UI theme preference captured during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemePreference {
    Light,
    Dark,
    Auto,
}

/// User preferences captured by the `preferences` step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub email_notifications: bool,
    pub download_quality: DownloadQuality,
    pub theme: ThemePreference,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            email_notifications: true,
            download_quality: DownloadQuality::High,
            theme: ThemePreference::Light,
        }
    }
}

/// The accumulated form persisted onto the profile when the flow finishes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OnboardingForm {
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub favorite_categories: Vec<String>,
    #[serde(default)]
    pub preferences: Preferences,
}

/// Partial data submitted with a single step; merged into the accumulated
/// form. Absent fields leave earlier answers untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepData {
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub avatar_url: Option<String>,
    pub favorite_categories: Option<Vec<String>>,
    pub preferences: Option<Preferences>,
}

impl OnboardingForm {
    pub fn merge(&mut self, data: StepData) {
        if let Some(v) = data.full_name {
            self.full_name = Some(v);
        }
        if let Some(v) = data.bio {
            self.bio = Some(v);
        }
        if let Some(v) = data.website {
            self.website = Some(v);
        }
        if let Some(v) = data.avatar_url {
            self.avatar_url = Some(v);
        }
        if let Some(v) = data.favorite_categories {
            self.favorite_categories = v;
        }
        if let Some(v) = data.preferences {
            self.preferences = v;
        }
    }
}

/// Outcome of [`OnboardingFlow::advance`].
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// Moved forward to the given step.
    Moved(OnboardingStep),
    /// Reached `complete`; the accumulated form is ready to persist and
    /// `onboarding_completed` must be set.
    Finished(OnboardingForm),
}

/// The pair `(current step, accumulated form data)`.
///
/// A user who authenticates again before finishing resumes from `welcome`:
/// the per-step records are a historical log, not cursor state, so the flow
/// restarts but previously entered data is replayed via
/// [`OnboardingFlow::replay`].
#[derive(Debug, Clone)]
pub struct OnboardingFlow {
    step: usize,
    form: OnboardingForm,
}

impl Default for OnboardingFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl OnboardingFlow {
    /// Start (or restart) at `welcome` with an empty form.
    pub fn new() -> Self {
        OnboardingFlow {
            step: 0,
            form: OnboardingForm::default(),
        }
    }

    pub fn current_step(&self) -> OnboardingStep {
        OnboardingStep::ALL[self.step]
    }

    pub fn form(&self) -> &OnboardingForm {
        &self.form
    }

    pub fn is_complete(&self) -> bool {
        self.current_step() == OnboardingStep::Complete
    }

    /// Merge `data` into the form and move one step forward. Advancing from
    /// the last named step finishes the flow; advancing a finished flow
    /// yields the final form again without transitioning.
    pub fn advance(&mut self, data: StepData) -> Advance {
        self.form.merge(data);
        let last = OnboardingStep::ALL.len() - 1;
        if self.step + 1 >= last {
            self.step = last;
            Advance::Finished(self.form.clone())
        } else {
            self.step += 1;
            Advance::Moved(self.current_step())
        }
    }

    /// Move one step back, floored at `welcome`. Never discards form data or
    /// previously persisted step records, and never leaves `complete`.
    pub fn retreat(&mut self) {
        if !self.is_complete() {
            self.step = self.step.saturating_sub(1);
        }
    }

    /// Rebuild the accumulated form from logged step data, applied in flow
    /// order. Used by the completion endpoint so an interrupted user loses
    /// entered data only, never persisted answers.
    pub fn replay(records: impl IntoIterator<Item = (OnboardingStep, StepData)>) -> OnboardingForm {
        let mut records: Vec<_> = records.into_iter().collect();
        records.sort_by_key(|(step, _)| step.index());

        let mut form = OnboardingForm::default();
        for (_, data) in records {
            form.merge(data);
        }
        form
    }
}
