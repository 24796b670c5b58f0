//! Value objects for analysis records

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::domain::LenientEnum;

/// Kanban status of a recommended task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Blocked,
    Done,
}

impl LenientEnum for TaskStatus {
    const ALL: &'static [Self] = &[Self::Todo, Self::InProgress, Self::Blocked, Self::Done];
    const FALLBACK: Self = Self::Todo;

    fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Blocked => "blocked",
            Self::Done => "done",
        }
    }
}

/// Priority of a recommended task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

impl LenientEnum for TaskPriority {
    const ALL: &'static [Self] = &[Self::High, Self::Medium, Self::Low];
    const FALLBACK: Self = Self::Medium;

    fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// How complete the project's documentation looks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DocumentationState {
    Incomplete,
    Partial,
    Complete,
    Unknown,
}

impl LenientEnum for DocumentationState {
    const ALL: &'static [Self] = &[
        Self::Incomplete,
        Self::Partial,
        Self::Complete,
        Self::Unknown,
    ];
    const FALLBACK: Self = Self::Unknown;

    fn as_str(&self) -> &'static str {
        match self {
            Self::Incomplete => "incomplete",
            Self::Partial => "partial",
            Self::Complete => "complete",
            Self::Unknown => "unknown",
        }
    }
}

/// Engineering discipline tracked in `progressByDiscipline`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Discipline {
    Frontend,
    Backend,
    Testing,
    Documentation,
    Ops,
}

impl Discipline {
    pub const ALL: [Discipline; 5] = [
        Discipline::Frontend,
        Discipline::Backend,
        Discipline::Testing,
        Discipline::Documentation,
        Discipline::Ops,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Discipline::Frontend => "frontend",
            Discipline::Backend => "backend",
            Discipline::Testing => "testing",
            Discipline::Documentation => "documentation",
            Discipline::Ops => "ops",
        }
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Completion percentage for each discipline. All five keys are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProgressByDiscipline {
    pub frontend: u8,
    pub backend: u8,
    pub testing: u8,
    pub documentation: u8,
    pub ops: u8,
}

impl ProgressByDiscipline {
    pub fn get(&self, discipline: Discipline) -> u8 {
        match discipline {
            Discipline::Frontend => self.frontend,
            Discipline::Backend => self.backend,
            Discipline::Testing => self.testing,
            Discipline::Documentation => self.documentation,
            Discipline::Ops => self.ops,
        }
    }

    pub fn set(&mut self, discipline: Discipline, value: u8) {
        let slot = match discipline {
            Discipline::Frontend => &mut self.frontend,
            Discipline::Backend => &mut self.backend,
            Discipline::Testing => &mut self.testing,
            Discipline::Documentation => &mut self.documentation,
            Discipline::Ops => &mut self.ops,
        };
        *slot = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Discipline, u8)> + '_ {
        Discipline::ALL.iter().map(|d| (*d, self.get(*d)))
    }
}
