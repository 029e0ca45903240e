// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::{Arc,
                atomic::{AtomicUsize, Ordering}};

use crate::{EofFn, InterruptFn, StdMutex, lock_recovering};

/// Hands out callbacks that remember how they were invoked.
#[derive(Debug, Clone, Default)]
pub struct CallbackRecorder {
    interrupt_reasons: Arc<StdMutex<Vec<String>>>,
    eof_count: Arc<AtomicUsize>,
}

impl CallbackRecorder {
    #[must_use]
    pub fn interrupt_fn(&self) -> InterruptFn {
        let reasons = Arc::clone(&self.interrupt_reasons);
        Arc::new(move |reason: &str| lock_recovering(&reasons).push(reason.to_string()))
    }

    #[must_use]
    pub fn eof_fn(&self) -> EofFn {
        let count = Arc::clone(&self.eof_count);
        Arc::new(move || {
            count.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[must_use]
    pub fn interrupt_reasons(&self) -> Vec<String> {
        lock_recovering(&self.interrupt_reasons).clone()
    }

    #[must_use]
    pub fn eof_count(&self) -> usize { self.eof_count.load(Ordering::SeqCst) }
}
