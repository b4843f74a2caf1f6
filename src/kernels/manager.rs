//! Runtime kernel selection with a cached choice.

use std::sync::OnceLock;

use super::{ScalarKernel, VectorKernel};
use crate::config::KernelChoice;

/// Holds every kernel compiled for this target, best first, and picks one.
///
/// The pick happens on the first call to [`select`](Self::select) and is
/// cached for the lifetime of the manager. [`ScalarKernel`] is always the
/// last provider and always available, so selection cannot fail.
pub struct KernelManager {
    providers: Vec<Box<dyn VectorKernel>>,
    choice: KernelChoice,
    selected: OnceLock<usize>,
}

impl KernelManager {
    /// Manager honoring the `MATMUL_KERNEL` environment variable.
    pub fn new() -> Self {
        Self::with_choice(KernelChoice::from_env())
    }

    /// Manager with an explicit choice, ignoring the environment.
    pub fn with_choice(choice: KernelChoice) -> Self {
        let mut providers: Vec<Box<dyn VectorKernel>> = Vec::new();

        #[cfg(all(target_arch = "x86_64", feature = "avx512"))]
        providers.push(Box::new(super::Avx512Kernel));

        #[cfg(target_arch = "x86_64")]
        providers.push(Box::new(super::Avx2Kernel));

        #[cfg(target_arch = "aarch64")]
        providers.push(Box::new(super::NeonKernel));

        providers.push(Box::new(ScalarKernel));

        Self {
            providers,
            choice,
            selected: OnceLock::new(),
        }
    }

    /// The kernel [`multiply`](crate::multiply) delegates to.
    pub fn select(&self) -> &dyn VectorKernel {
        let idx = *self.selected.get_or_init(|| self.resolve());
        self.providers[idx].as_ref()
    }

    fn resolve(&self) -> usize {
        if let Some(name) = self.choice.kernel_name() {
            let forced = self
                .providers
                .iter()
                .position(|p| p.name() == name && p.is_available());
            match forced {
                Some(idx) => {
                    log::info!("Selected matmul kernel: {name} (forced)");
                    return idx;
                }
                None => log::warn!("Requested matmul kernel {name} is not available, using auto"),
            }
        }

        for (idx, provider) in self.providers.iter().enumerate() {
            if provider.is_available() {
                log::info!("Selected matmul kernel: {}", provider.name());
                return idx;
            }
        }

        self.providers.len() - 1
    }

    /// Name of the selected kernel, if selection has happened yet.
    pub fn selected_name(&self) -> Option<&'static str> {
        self.selected
            .get()
            .and_then(|&idx| self.providers.get(idx))
            .map(|p| p.name())
    }

    /// Names of compiled-in kernels that run on this CPU, best first.
    pub fn available(&self) -> Vec<&'static str> {
        self.providers
            .iter()
            .filter(|p| p.is_available())
            .map(|p| p.name())
            .collect()
    }
}

impl Default for KernelManager {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL: OnceLock<KernelManager> = OnceLock::new();

/// The process-wide manager, built on first use.
pub fn kernel_manager() -> &'static KernelManager {
    GLOBAL.get_or_init(KernelManager::new)
}
