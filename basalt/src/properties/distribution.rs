use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use strum_macros::AsRefStr;

use crate::properties::{HashDistributionDesc, PhysicalProp, PropertyInfo};

/// Kind of a distribution without its payload.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DistributionType {
    Any,
    Broadcast,
    Shuffle,
    Gather,
}

/// Distribution kind as sent to the execution layer.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WireDistributionType {
    Any,
    Broadcast,
    Shuffle,
    Gather,
}

impl DistributionType {
    pub fn to_wire(self) -> WireDistributionType {
        match self {
            DistributionType::Any => WireDistributionType::Any,
            DistributionType::Broadcast => WireDistributionType::Broadcast,
            DistributionType::Shuffle => WireDistributionType::Shuffle,
            DistributionType::Gather => WireDistributionType::Gather,
        }
    }
}

#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub enum DistributionKind {
    /// No requirement on how data is spread.
    Any,
    /// Every instance holds a full copy.
    Broadcast,
    /// Rows are placed by hashing columns.
    Shuffle(HashDistributionDesc),
    /// All rows are collected in a single instance, optionally at most `limit` of them.
    Gather { limit: Option<u64> },
}

/// Data distribution delivered or required by a physical plan.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct DistributionSpec {
    kind: DistributionKind,
    property_info: PropertyInfo,
}

impl DistributionSpec {
    fn new(kind: DistributionKind) -> Self {
        Self {
            kind,
            property_info: PropertyInfo::default(),
        }
    }

    pub fn any() -> Self {
        Self::new(DistributionKind::Any)
    }

    pub fn hash(desc: HashDistributionDesc) -> Self {
        Self::new(DistributionKind::Shuffle(desc))
    }

    pub fn replicated() -> Self {
        Self::new(DistributionKind::Broadcast)
    }

    pub fn gather() -> Self {
        Self::new(DistributionKind::Gather { limit: None })
    }

    pub fn gather_with_limit(limit: u64) -> Self {
        Self::new(DistributionKind::Gather { limit: Some(limit) })
    }

    pub fn with_property_info(mut self, property_info: PropertyInfo) -> Self {
        self.property_info = property_info;
        self
    }

    pub fn kind(&self) -> &DistributionKind {
        &self.kind
    }

    pub fn property_info(&self) -> &PropertyInfo {
        &self.property_info
    }

    pub fn distribution_type(&self) -> DistributionType {
        match self.kind {
            DistributionKind::Any => DistributionType::Any,
            DistributionKind::Broadcast => DistributionType::Broadcast,
            DistributionKind::Shuffle(_) => DistributionType::Shuffle,
            DistributionKind::Gather { .. } => DistributionType::Gather,
        }
    }

    /// Whether data distributed as `self` can be consumed by a parent requiring `required`
    /// without an exchange.
    pub fn is_satisfy(&self, required: &DistributionSpec) -> bool {
        match (&self.kind, &required.kind) {
            (_, DistributionKind::Any) => true,
            (DistributionKind::Any, _) => false,
            (
                DistributionKind::Gather { limit },
                DistributionKind::Gather {
                    limit: required_limit,
                },
            ) => match (limit, required_limit) {
                (_, None) => true,
                (Some(limit), Some(required_limit)) => limit <= required_limit,
                (None, Some(_)) => false,
            },
            (DistributionKind::Broadcast, DistributionKind::Broadcast) => true,
            (DistributionKind::Shuffle(desc), DistributionKind::Shuffle(required_desc)) => desc
                .is_satisfy(
                    &self.property_info,
                    required_desc,
                    &required.property_info,
                ),
            _ => false,
        }
    }
}

impl PhysicalProp for DistributionSpec {
    fn satisfies(&self, other: &Self) -> bool {
        self.is_satisfy(other)
    }
}

impl Display for DistributionSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.distribution_type().as_ref())
    }
}
