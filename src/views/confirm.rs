/// Two-phase confirmation for a destructive action on one record.
///
/// `request` arms the flow with a target; the action only runs on
/// `confirm`. Both `confirm` and `cancel` return the flow to idle.
#[derive(Debug, Clone)]
pub struct ConfirmFlow<T> {
    pending: Option<T>,
}

impl<T> Default for ConfirmFlow<T> {
    fn default() -> Self {
        ConfirmFlow { pending: None }
    }
}

impl<T> ConfirmFlow<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm with a target, replacing any earlier one
    pub fn request(&mut self, target: T) {
        self.pending = Some(target);
    }

    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Dismiss without running anything
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Run `action` once on the pending target. `None` when nothing was pending.
    pub fn confirm<R>(&mut self, action: impl FnOnce(T) -> R) -> Option<R> {
        self.pending.take().map(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_runs_action_once_and_clears() {
        let mut flow = ConfirmFlow::new();
        flow.request(7u32);
        assert!(flow.is_pending());

        let mut calls = Vec::new();
        let out = flow.confirm(|id| {
            calls.push(id);
            id * 2
        });
        assert_eq!(out, Some(14));
        assert_eq!(calls, vec![7]);
        assert!(!flow.is_pending());

        // Confirming again is a no-op
        assert_eq!(flow.confirm(|id: u32| id), None);
    }

    #[test]
    fn cancel_never_runs_action() {
        let mut flow = ConfirmFlow::new();
        flow.request("ticket");
        flow.cancel();
        let mut ran = false;
        flow.confirm(|_| ran = true);
        assert!(!ran);
        assert!(flow.pending().is_none());
    }

    #[test]
    fn request_replaces_target() {
        let mut flow = ConfirmFlow::new();
        flow.request(1);
        flow.request(2);
        assert_eq!(flow.pending(), Some(&2));
    }
}
