use serde::{Deserialize, Serialize};

use crate::algorithm::AlgorithmKind;

/// State of the most recent algorithm run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum Status {
    #[default]
    Idle,
    Running {
        kind: AlgorithmKind,
    },
    Succeeded {
        message: String,
    },
    Failed {
        message: String,
    },
}

impl Status {
    pub fn is_running(&self) -> bool {
        matches!(self, Status::Running { .. })
    }
}
