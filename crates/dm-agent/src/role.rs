//! Agent roles and activity status.

use std::fmt;

/// An agent's behavioral category.
///
/// Each variant carries only the data its rules need; `trust_level` exists
/// on citizens alone.  The only legal transitions are
/// `Citizen → DrugUser`, `Dealer → Arrested` and `DrugUser → Arrested`;
/// [`AgentStore`][crate::AgentStore] enforces them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case", tag = "role"))]
pub enum Role {
    /// `trust_level` is in `[0, 100]`.  Descriptive only; no rule reads it.
    Citizen { trust_level: u8 },
    DrugUser,
    Dealer,
    Police,
    DataCollector,
    Arrested,
}

impl Role {
    /// The field-less discriminant.
    #[inline]
    pub fn kind(&self) -> RoleKind {
        match self {
            Role::Citizen { .. } => RoleKind::Citizen,
            Role::DrugUser       => RoleKind::DrugUser,
            Role::Dealer         => RoleKind::Dealer,
            Role::Police         => RoleKind::Police,
            Role::DataCollector  => RoleKind::DataCollector,
            Role::Arrested       => RoleKind::Arrested,
        }
    }

    /// `true` for roles police may arrest.
    #[inline]
    pub fn is_offender(&self) -> bool {
        matches!(self, Role::Dealer | Role::DrugUser)
    }

    /// `true` for roles that may receive data-collector messages.
    #[inline]
    pub fn is_message_recipient(&self) -> bool {
        matches!(self, Role::Police | Role::Citizen { .. })
    }

    /// Citizen trust level, `None` for every other role.
    #[inline]
    pub fn trust_level(&self) -> Option<u8> {
        match self {
            Role::Citizen { trust_level } => Some(*trust_level),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind().fmt(f)
    }
}

/// Field-less role tag, handy for counting, filtering and output columns.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum RoleKind {
    Citizen,
    DrugUser,
    Dealer,
    Police,
    DataCollector,
    Arrested,
}

impl RoleKind {
    pub const ALL: [RoleKind; 6] = [
        RoleKind::Citizen,
        RoleKind::DrugUser,
        RoleKind::Dealer,
        RoleKind::Police,
        RoleKind::DataCollector,
        RoleKind::Arrested,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RoleKind::Citizen       => "citizen",
            RoleKind::DrugUser      => "drug-user",
            RoleKind::Dealer        => "dealer",
            RoleKind::Police        => "police",
            RoleKind::DataCollector => "data-collector",
            RoleKind::Arrested      => "arrested",
        }
    }
}

impl fmt::Display for RoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an agent still acts.  `Inactive` is terminal and implies
/// `Role::Arrested`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Status {
    #[default]
    Active,
    Inactive,
}

impl Status {
    #[inline]
    pub fn is_active(self) -> bool {
        self == Status::Active
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Active   => "active",
            Status::Inactive => "inactive",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
