//! Kernel selection override read from the environment.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Environment variable consulted once, when the global kernel manager is built.
pub const KERNEL_ENV: &str = "MATMUL_KERNEL";

/// Which vector kernel [`multiply`](crate::multiply) should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KernelChoice {
    /// Fastest kernel the running CPU supports.
    #[default]
    Auto,
    Scalar,
    Avx2,
    Avx512,
    Neon,
}

impl KernelChoice {
    /// Name of the forced kernel, matching [`VectorKernel::name`](crate::VectorKernel::name).
    pub fn kernel_name(&self) -> Option<&'static str> {
        match self {
            KernelChoice::Auto => None,
            KernelChoice::Scalar => Some("scalar"),
            KernelChoice::Avx2 => Some("avx2"),
            KernelChoice::Avx512 => Some("avx512"),
            KernelChoice::Neon => Some("neon"),
        }
    }

    /// Read [`KERNEL_ENV`]. Unset means `Auto`; an invalid value is logged and also means `Auto`.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(KERNEL_ENV).ok().as_deref())
    }

    pub(crate) fn from_env_value(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return KernelChoice::Auto;
        };
        match value.parse() {
            Ok(choice) => choice,
            Err(err) => {
                log::warn!("Ignoring {KERNEL_ENV}: {err}");
                KernelChoice::Auto
            }
        }
    }
}

impl FromStr for KernelChoice {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "auto" => Ok(KernelChoice::Auto),
            "scalar" => Ok(KernelChoice::Scalar),
            "avx2" => Ok(KernelChoice::Avx2),
            "avx512" | "avx-512" => Ok(KernelChoice::Avx512),
            "neon" => Ok(KernelChoice::Neon),
            _ => Err(ConfigError::UnknownKernel(s.to_string())),
        }
    }
}

impl fmt::Display for KernelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kernel_name().unwrap_or("auto"))
    }
}
