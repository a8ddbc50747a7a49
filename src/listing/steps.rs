use std::fmt;

use crate::models::ListingField;

pub const TOTAL_STEPS: u8 = 4;

/// Pages of the add-listing wizard, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStep {
    BasicInfo,
    DetailsAndFeatures,
    PhotosAndMedia,
    PricingAndTerms,
}

impl WizardStep {
    pub const ALL: [WizardStep; TOTAL_STEPS as usize] = [
        WizardStep::BasicInfo,
        WizardStep::DetailsAndFeatures,
        WizardStep::PhotosAndMedia,
        WizardStep::PricingAndTerms,
    ];

    pub fn first() -> Self {
        WizardStep::BasicInfo
    }

    pub fn last() -> Self {
        WizardStep::PricingAndTerms
    }

    /// 1-based position
    pub fn number(self) -> u8 {
        match self {
            WizardStep::BasicInfo => 1,
            WizardStep::DetailsAndFeatures => 2,
            WizardStep::PhotosAndMedia => 3,
            WizardStep::PricingAndTerms => 4,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        n.checked_sub(1)
            .and_then(|i| Self::ALL.get(i as usize))
            .copied()
    }

    pub fn is_last(self) -> bool {
        self == Self::last()
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::BasicInfo => "Basic Info",
            WizardStep::DetailsAndFeatures => "Details & Features",
            WizardStep::PhotosAndMedia => "Photos & Media",
            WizardStep::PricingAndTerms => "Pricing & Terms",
        }
    }

    /// Text fields that must be filled in before leaving this step
    pub fn required_fields(self) -> &'static [ListingField] {
        match self {
            WizardStep::BasicInfo => &[ListingField::Title, ListingField::Description],
            WizardStep::DetailsAndFeatures => {
                &[ListingField::Address, ListingField::City, ListingField::State]
            }
            WizardStep::PhotosAndMedia => &[],
            WizardStep::PricingAndTerms => &[ListingField::Price],
        }
    }

    /// Steps from `self` up to, but not including, `target`
    pub fn through(self, target: WizardStep) -> impl Iterator<Item = WizardStep> {
        Self::ALL
            .into_iter()
            .filter(move |s| *s >= self && *s < target)
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.title())
    }
}
