//! Shared test doubles.

use std::cell::RefCell;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::catalog::SupportData;
use crate::confirm::{ConfirmationRequest, Confirmer};
use crate::error::{Result, SupportError};
use crate::repository::{LoadOutcome, SupportRepository};

/// In-memory repository that records saves and can be told to fail.
pub struct MockSupportRepository {
    stored: Mutex<Option<SupportData>>,
    fail_writes: AtomicBool,
    saves: AtomicUsize,
}

impl MockSupportRepository {
    pub fn new() -> Self {
        Self {
            stored: Mutex::new(None),
            fail_writes: AtomicBool::new(false),
            saves: AtomicUsize::new(0),
        }
    }

    pub fn with_data(data: SupportData) -> Self {
        let repository = Self::new();
        *repository.stored.lock().unwrap() = Some(data);
        repository
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn stored(&self) -> Option<SupportData> {
        self.stored.lock().unwrap().clone()
    }
}

impl SupportRepository for MockSupportRepository {
    fn load(&self) -> LoadOutcome {
        let mut data = self.stored.lock().unwrap().clone().unwrap_or_default();
        data.normalize();
        LoadOutcome::loaded(data)
    }

    fn save(&self, data: &SupportData) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(SupportError::io("quota exceeded"));
        }
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.stored.lock().unwrap() = Some(data.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(SupportError::io("quota exceeded"));
        }
        *self.stored.lock().unwrap() = None;
        Ok(())
    }
}

/// Answers from a script and records every request it was asked.
pub struct ScriptedConfirmer {
    answers: RefCell<Vec<bool>>,
    pub asked: RefCell<Vec<ConfirmationRequest>>,
}

impl ScriptedConfirmer {
    pub fn new(answers: &[bool]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().rev().copied().collect()),
            asked: RefCell::new(Vec::new()),
        }
    }
}

impl Confirmer for ScriptedConfirmer {
    fn confirm(&self, request: &ConfirmationRequest) -> bool {
        self.asked.borrow_mut().push(request.clone());
        self.answers.borrow_mut().pop().unwrap_or(false)
    }
}
