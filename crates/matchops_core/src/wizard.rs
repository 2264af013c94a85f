//! Match setup wizard.
//!
//! A strictly linear three-step flow: Team Setup → Officials Setup → Review.
//! The wizard is an explicit state machine; each step stores its own draft,
//! and navigating back never discards drafts entered for later steps.
//! Nothing is persisted until `finish()` — dropping the wizard mid-flow
//! discards everything.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{OpsError, Result};
use crate::models::{GameSettings, MatchId, MatchSetup, OfficialRole, RosterPlayer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardStep {
    TeamSetup,
    OfficialsSetup,
    Review,
}

impl WizardStep {
    /// Forward transition table. `Review` is the last step.
    pub fn next(&self) -> Option<WizardStep> {
        match self {
            WizardStep::TeamSetup => Some(WizardStep::OfficialsSetup),
            WizardStep::OfficialsSetup => Some(WizardStep::Review),
            WizardStep::Review => None,
        }
    }

    /// Backward transition table. `TeamSetup` is the first step.
    pub fn back(&self) -> Option<WizardStep> {
        match self {
            WizardStep::TeamSetup => None,
            WizardStep::OfficialsSetup => Some(WizardStep::TeamSetup),
            WizardStep::Review => Some(WizardStep::OfficialsSetup),
        }
    }
}

/// Draft entered on the Team Setup step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamSetupDraft {
    pub home_roster: Vec<RosterPlayer>,
    pub away_roster: Vec<RosterPlayer>,
    pub settings: GameSettings,
}

/// Draft entered on the Officials Setup step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfficialsDraft {
    pub officials: BTreeMap<OfficialRole, String>,
}

/// One setup session for one match. Created by
/// `LifecycleManager::initialize_setup` once the operator lock is held.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupWizard {
    match_id: MatchId,
    step: WizardStep,
    team_draft: Option<TeamSetupDraft>,
    officials_draft: Option<OfficialsDraft>,
}

impl SetupWizard {
    pub fn new(match_id: MatchId) -> Self {
        Self { match_id, step: WizardStep::TeamSetup, team_draft: None, officials_draft: None }
    }

    pub fn match_id(&self) -> MatchId {
        self.match_id
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn team_draft(&self) -> Option<&TeamSetupDraft> {
        self.team_draft.as_ref()
    }

    pub fn officials_draft(&self) -> Option<&OfficialsDraft> {
        self.officials_draft.as_ref()
    }

    /// Complete the Team Setup step and advance.
    pub fn submit_teams(&mut self, draft: TeamSetupDraft) -> Result<()> {
        if self.step != WizardStep::TeamSetup {
            return Err(OpsError::Validation(format!(
                "team setup cannot be submitted from step {:?}",
                self.step
            )));
        }
        self.team_draft = Some(draft);
        self.step = WizardStep::OfficialsSetup;
        Ok(())
    }

    /// Complete the Officials Setup step and advance to review.
    pub fn submit_officials(&mut self, draft: OfficialsDraft) -> Result<()> {
        if self.step != WizardStep::OfficialsSetup {
            return Err(OpsError::Validation(format!(
                "officials setup cannot be submitted from step {:?}",
                self.step
            )));
        }
        self.officials_draft = Some(draft);
        self.step = WizardStep::Review;
        Ok(())
    }

    /// Navigate one step back. Drafts already entered for later steps are
    /// kept, so returning forward re-shows them.
    pub fn go_back(&mut self) -> Result<()> {
        match self.step.back() {
            Some(prev) => {
                self.step = prev;
                Ok(())
            }
            None => Err(OpsError::Validation("already on the first step".to_string())),
        }
    }

    /// Navigate forward without re-entering data, allowed only onto steps
    /// whose draft already exists.
    pub fn go_forward(&mut self) -> Result<()> {
        let next = self
            .step
            .next()
            .ok_or_else(|| OpsError::Validation("already on the review step".to_string()))?;

        let allowed = match next {
            WizardStep::TeamSetup => true,
            WizardStep::OfficialsSetup => self.team_draft.is_some(),
            WizardStep::Review => self.team_draft.is_some() && self.officials_draft.is_some(),
        };
        if !allowed {
            return Err(OpsError::Validation(format!("step {:?} has no data yet", next)));
        }
        self.step = next;
        Ok(())
    }

    /// Confirm from the review step, yielding the combined setup payload.
    pub fn finish(self) -> Result<MatchSetup> {
        if self.step != WizardStep::Review {
            return Err(OpsError::Validation(format!(
                "setup can only be confirmed from the review step, current step is {:?}",
                self.step
            )));
        }
        let team = self
            .team_draft
            .ok_or_else(|| OpsError::Validation("team setup is incomplete".to_string()))?;
        let officials = self
            .officials_draft
            .ok_or_else(|| OpsError::Validation("officials setup is incomplete".to_string()))?;

        Ok(MatchSetup {
            home_roster: team.home_roster,
            away_roster: team.away_roster,
            officials: officials.officials,
            settings: Some(team.settings),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team_draft() -> TeamSetupDraft {
        TeamSetupDraft {
            home_roster: vec![RosterPlayer {
                id: "p1".to_string(),
                number: 10,
                name: "Ten".to_string(),
                position: "FW".to_string(),
            }],
            away_roster: Vec::new(),
            settings: GameSettings::default(),
        }
    }

    fn officials_draft() -> OfficialsDraft {
        let mut officials = BTreeMap::new();
        officials.insert(OfficialRole::Referee, "R. Whistle".to_string());
        OfficialsDraft { officials }
    }

    #[test]
    fn test_linear_flow() {
        let mut wizard = SetupWizard::new(MatchId::new());
        assert_eq!(wizard.step(), WizardStep::TeamSetup);

        wizard.submit_teams(team_draft()).unwrap();
        assert_eq!(wizard.step(), WizardStep::OfficialsSetup);

        wizard.submit_officials(officials_draft()).unwrap();
        assert_eq!(wizard.step(), WizardStep::Review);

        let setup = wizard.finish().unwrap();
        assert_eq!(setup.home_roster.len(), 1);
        assert_eq!(setup.officials.get(&OfficialRole::Referee).unwrap(), "R. Whistle");
    }

    #[test]
    fn test_back_navigation_preserves_drafts() {
        let mut wizard = SetupWizard::new(MatchId::new());
        wizard.submit_teams(team_draft()).unwrap();
        wizard.submit_officials(officials_draft()).unwrap();

        // Back to the first step and forward again
        wizard.go_back().unwrap();
        wizard.go_back().unwrap();
        assert_eq!(wizard.step(), WizardStep::TeamSetup);

        assert_eq!(wizard.team_draft().unwrap(), &team_draft());
        assert_eq!(wizard.officials_draft().unwrap(), &officials_draft());

        wizard.go_forward().unwrap();
        wizard.go_forward().unwrap();
        assert_eq!(wizard.step(), WizardStep::Review);
        assert!(wizard.finish().is_ok());
    }

    #[test]
    fn test_forward_without_data_rejected() {
        let mut wizard = SetupWizard::new(MatchId::new());
        assert!(matches!(wizard.go_forward(), Err(OpsError::Validation(_))));
    }

    #[test]
    fn test_finish_requires_review_step() {
        let mut wizard = SetupWizard::new(MatchId::new());
        wizard.submit_teams(team_draft()).unwrap();
        assert!(matches!(wizard.finish(), Err(OpsError::Validation(_))));
    }

    #[test]
    fn test_submit_out_of_order_rejected() {
        let mut wizard = SetupWizard::new(MatchId::new());
        assert!(wizard.submit_officials(officials_draft()).is_err());

        wizard.submit_teams(team_draft()).unwrap();
        assert!(wizard.submit_teams(team_draft()).is_err());
    }

    #[test]
    fn test_back_from_first_step_rejected() {
        let mut wizard = SetupWizard::new(MatchId::new());
        assert!(wizard.go_back().is_err());
    }
}
