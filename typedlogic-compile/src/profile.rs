/*! Describes the fragments of first-order logic that targets accept.

A [`Profile`] is a capability tag. Tags form a directed acyclic graph through
[`Profile::parents`]: a target that implements [`Profile::ClassicDatalog`] also implements
[`Profile::ClosedWorld`] and [`Profile::SingleModelSemantics`]. A [`ProfileSet`] mixes several
tags and may exclude some explicitly.

Implementation is decided under negation as failure: when nothing proves that a profile is
implemented, [`ProfileSet::implements`] returns false, whereas [`ProfileSet::not_implements`]
tells apart what is provably excluded from what is simply unknown. */
use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// Is a capability tag of a target syntax or solver.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Profile {
    // computational properties
    ComputationalProfile,
    Decidable,
    Undecidable,

    // logical features
    LogicalFeature,
    NegationLogic,
    DisjunctionLogic,
    ConjunctionLogic,
    AllowsComparisonTerms,

    // model semantics
    ModelMultiplicitySemantics,
    SingleModelSemantics,
    MultipleModelSemantics,

    // assumptions
    Assumption,
    OpenWorld,
    ClosedWorld,
    WellFoundedSemantics,
    ClassicPrologNegationAsFailure,

    // type systems
    TypeSystem,
    UnsortedLogic,
    SortedLogic,

    // families
    LogicalFamily,
    Classical,
    NonClassical,
    Modal,
    Temporal,
    Paraconsistent,
    Intuitionistic,
    Probabilistic,

    // subsets
    LogicalSubset,
    Unrestricted,
    ClassicDatalog,
    DisjunctiveDatalog,
    DescriptionLogic,
    OwlProfile,
    Owl2Dl,
    ModalLogic,

    // orders
    OrderOfLogic,
    PropositionalLogic,
    FirstOrder,
    HigherOrder,

    NamedLogic,
    AnswerSetProgramming,

    // reasoning paradigms
    ReasoningParadigm,
    Inductive,
    Deductive,
    Abductive,
    Monotonic,
    NonMonotonic,
    ConstraintSolver,

    Unspecified,
}

// pairs of profiles that no target implements together
const DISJOINT: &[(Profile, Profile)] = &[(Profile::ClosedWorld, Profile::OpenWorld)];

impl Profile {
    /// Returns the profiles that the receiver directly specializes.
    pub fn parents(&self) -> &'static [Profile] {
        use Profile::*;
        match self {
            Decidable | Undecidable => &[ComputationalProfile],
            NegationLogic | DisjunctionLogic | ConjunctionLogic | AllowsComparisonTerms => {
                &[LogicalFeature]
            }
            SingleModelSemantics | MultipleModelSemantics => &[ModelMultiplicitySemantics],
            OpenWorld | ClosedWorld => &[Assumption],
            WellFoundedSemantics | ClassicPrologNegationAsFailure => &[ClosedWorld],
            UnsortedLogic | SortedLogic => &[TypeSystem],
            Classical | NonClassical | Modal | Temporal | Paraconsistent | Intuitionistic
            | Probabilistic => &[LogicalFamily],
            Unrestricted => &[LogicalSubset, Undecidable],
            ClassicDatalog => &[LogicalSubset, ClosedWorld, SingleModelSemantics],
            DisjunctiveDatalog => &[LogicalSubset, ClosedWorld, MultipleModelSemantics],
            DescriptionLogic => &[LogicalSubset, Decidable],
            OwlProfile | ModalLogic => &[LogicalSubset],
            Owl2Dl => &[DescriptionLogic, OwlProfile],
            PropositionalLogic | FirstOrder | HigherOrder => &[OrderOfLogic],
            AnswerSetProgramming => &[NamedLogic, WellFoundedSemantics, DisjunctiveDatalog],
            Inductive | Deductive | Abductive | Monotonic | NonMonotonic | ConstraintSolver => {
                &[ReasoningParadigm]
            }
            _ => &[],
        }
    }

    /// Returns the receiver followed by every profile it transitively specializes, without
    /// duplicates.
    pub fn ancestors(&self) -> Vec<Profile> {
        let mut result = vec![*self];
        let mut index = 0;
        while index < result.len() {
            for parent in result[index].parents() {
                if !result.contains(parent) {
                    result.push(*parent);
                }
            }
            index += 1;
        }
        result
    }

    /// Returns true if the receiver is `profile` or specializes it.
    #[inline(always)]
    pub fn implements(&self, profile: Profile) -> bool {
        self.ancestors().contains(&profile)
    }

    /// Returns `Some(false)` if the receiver implements `profile`, `Some(true)` if it provably
    /// does not and `None` if that is unknown.
    pub fn not_implements(&self, profile: Profile) -> Option<bool> {
        if self.implements(profile) {
            return Some(false);
        }
        let ours = self.ancestors();
        let theirs = profile.ancestors();
        let disjoint = DISJOINT.iter().any(|(a, b)| {
            (ours.contains(a) && theirs.contains(b)) || (ours.contains(b) && theirs.contains(a))
        });
        if disjoint {
            Some(true)
        } else {
            None
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Mixes profiles and records the ones that are explicitly excluded.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct ProfileSet {
    profiles: Vec<Profile>,
    excluded: Vec<Profile>,
}

impl ProfileSet {
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self {
            profiles,
            excluded: Vec::new(),
        }
    }

    /// Returns a copy of the receiver that excludes `profile`.
    pub fn excluding(mut self, profile: Profile) -> Self {
        self.excluded.push(profile);
        self
    }

    #[inline(always)]
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    #[inline(always)]
    pub fn excluded(&self) -> &[Profile] {
        &self.excluded
    }

    /// Returns true if one of the mixed profiles implements `profile`.
    pub fn implements(&self, profile: Profile) -> bool {
        self.profiles.iter().any(|p| p.implements(profile))
            && !self.excluded.iter().any(|p| p.implements(profile))
    }

    /// Returns `Some(true)` if `profile` is excluded or disjoint with one of the mixed profiles,
    /// `Some(false)` if it is implemented and `None` otherwise. Exclusions take precedence.
    pub fn not_implements(&self, profile: Profile) -> Option<bool> {
        if self.excluded.iter().any(|p| p.implements(profile))
            || self
                .profiles
                .iter()
                .any(|p| p.not_implements(profile) == Some(true))
        {
            Some(true)
        } else if self.implements(profile) {
            Some(false)
        } else {
            None
        }
    }
}
