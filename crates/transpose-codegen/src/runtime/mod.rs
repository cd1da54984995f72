//! Generation modes and their runtime preludes.
//!
//! ```text
//! Mode::Native   ─> NativeStrategy   plain `const`/`let` bindings
//! Mode::Managed  ─> ManagedStrategy  `{ value, type, ...flags }` records
//! ```
//!
//! The mode is fixed for one translation run and passed by value.

/// Helpers shared by both preludes.
macro_rules! common_helpers {
    () => {
        r#"function __isNil(value: unknown): value is null | undefined {
  return value === undefined || value === null;
}

function __try<T>(body: () => T): T | undefined {
  try {
    return body();
  } catch {
    return undefined;
  }
}

function __range(lower: number, upper: number): number[] {
  const values: number[] = [];
  for (let i = lower; i < upper; i++) {
    values.push(i);
  }
  return values;
}
"#
    };
}

pub mod managed;
pub mod native;

use crate::traits::Strategy;
use serde::{Deserialize, Serialize};

pub use managed::{MANAGED, ManagedStrategy};
pub use native::{NATIVE, NativeStrategy};

/// Generation mode selected for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Idiomatic target code with native bindings.
    #[default]
    Native,
    /// Every binding is a tagged record read through `.value`.
    Managed,
}

impl Mode {
    /// Map the `managedRuntime` switch onto a mode.
    pub fn from_managed_runtime(managed_runtime: bool) -> Self {
        if managed_runtime {
            Mode::Managed
        } else {
            Mode::Native
        }
    }

    pub fn is_managed(self) -> bool {
        self == Mode::Managed
    }

    pub fn strategy(self) -> &'static dyn Strategy {
        match self {
            Mode::Native => &NATIVE,
            Mode::Managed => &MANAGED,
        }
    }

    pub fn name(self) -> &'static str {
        self.strategy().name()
    }

    pub fn prelude(self) -> &'static str {
        self.strategy().prelude()
    }
}
