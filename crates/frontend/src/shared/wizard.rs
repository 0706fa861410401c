//! Multi-step form navigation guarded by per-step completion.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("step {0} does not exist")]
    OutOfRange(usize),
    #[error("complete the previous steps before opening this one")]
    Locked(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepWizard<K> {
    steps: Vec<K>,
    completed: Vec<bool>,
    current: usize,
}

impl<K: Copy + PartialEq> StepWizard<K> {
    pub fn new(steps: impl IntoIterator<Item = K>) -> Self {
        let steps: Vec<K> = steps.into_iter().collect();
        let completed = vec![false; steps.len()];
        Self {
            steps,
            completed,
            current: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> Option<K> {
        self.steps.get(self.current).copied()
    }

    pub fn index_of(&self, step: K) -> Option<usize> {
        self.steps.iter().position(|s| *s == step)
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.steps.len()
    }

    pub fn is_completed(&self, index: usize) -> bool {
        self.completed.get(index).copied().unwrap_or(false)
    }

    /// Every step done; the UI shows the completion view from here on.
    /// A wizard without steps has nothing left to do.
    pub fn is_complete(&self) -> bool {
        self.completed.iter().all(|done| *done)
    }

    pub fn go_next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.current += 1;
        true
    }

    pub fn go_back(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Backwards, or forward onto an already completed step.
    pub fn can_jump_to(&self, index: usize) -> bool {
        index < self.steps.len() && (index <= self.current || self.is_completed(index))
    }

    pub fn jump_to(&mut self, index: usize) -> Result<(), WizardError> {
        if index >= self.steps.len() {
            return Err(WizardError::OutOfRange(index));
        }
        if !self.can_jump_to(index) {
            return Err(WizardError::Locked(index));
        }
        self.current = index;
        Ok(())
    }

    pub fn mark_completed(&mut self, step: K) {
        if let Some(i) = self.index_of(step) {
            self.completed[i] = true;
        }
    }

    /// Replace the completion flags, e.g. from the server's progress record.
    pub fn set_completion(&mut self, done: impl Fn(K) -> bool) {
        for (i, step) in self.steps.iter().enumerate() {
            self.completed[i] = done(*step);
        }
    }

    pub fn first_incomplete(&self) -> Option<usize> {
        self.completed.iter().position(|done| !*done)
    }

    /// Move to the first unfinished step, used after loading saved progress.
    pub fn resume(&mut self) {
        if let Some(i) = self.first_incomplete() {
            self.current = i;
        }
    }

    /// Steps done, for the progress bar.
    pub fn completed_count(&self) -> usize {
        self.completed.iter().filter(|done| **done).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Step {
        A,
        B,
        C,
    }

    fn wizard() -> StepWizard<Step> {
        StepWizard::new([Step::A, Step::B, Step::C])
    }

    #[test]
    fn test_next_and_back_stay_in_bounds() {
        let mut w = wizard();
        assert!(!w.go_back());
        assert!(w.go_next());
        assert_eq!(w.current_index(), 1);
        assert!(w.go_next());
        assert!(!w.go_next());
        assert_eq!(w.current_step(), Some(Step::C));
        assert!(w.go_back());
        assert_eq!(w.current_index(), 1);
    }

    #[test]
    fn test_jump_guarded_by_completion() {
        let mut w = wizard();
        w.set_completion(|s| s == Step::A);

        assert_eq!(w.jump_to(2), Err(WizardError::Locked(2)));
        assert_eq!(w.current_index(), 0);
        assert_eq!(w.jump_to(0), Ok(()));
        assert_eq!(w.jump_to(7), Err(WizardError::OutOfRange(7)));

        w.mark_completed(Step::C);
        assert!(w.can_jump_to(2));
        assert_eq!(w.jump_to(2), Ok(()));
        // Backwards is always fine.
        assert_eq!(w.jump_to(1), Ok(()));
    }

    #[test]
    fn test_complete_regardless_of_index() {
        let mut w = wizard();
        assert!(!w.is_complete());
        w.set_completion(|_| true);
        assert_eq!(w.current_index(), 0);
        assert!(w.is_complete());
        assert_eq!(w.completed_count(), 3);
    }

    #[test]
    fn test_no_steps_is_complete() {
        let w = StepWizard::<Step>::new([]);
        assert!(w.is_empty());
        assert_eq!(w.completed_count(), 0);
        assert!(w.is_complete());
    }

    #[test]
    fn test_resume_goes_to_first_unfinished() {
        let mut w = wizard();
        w.set_completion(|s| s != Step::C);
        w.resume();
        assert_eq!(w.current_step(), Some(Step::C));
    }

    #[test]
    fn test_locked_message() {
        assert_eq!(
            WizardError::Locked(2).to_string(),
            "complete the previous steps before opening this one"
        );
    }
}
