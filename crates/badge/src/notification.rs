use crate::check::EarnedBadge;

/// Explicit hand-off value for the display layer: the badges earned since
/// the last time the value was taken, deduplicated by badge id. The engine
/// keeps no ambient notification state; whoever renders holds one of these
/// across redirects and calls `take` when it shows the message.
#[derive(Debug, Default, Clone)]
pub struct PendingNotification {
    badges: Vec<EarnedBadge>,
}

impl PendingNotification {
    pub fn merge(&mut self, newly_earned: &[EarnedBadge]) {
        for badge in newly_earned {
            if self.badges.iter().any(|b| b.id == badge.id) {
                continue;
            }
            self.badges.push(badge.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.badges.is_empty()
    }

    pub fn badges(&self) -> &[EarnedBadge] {
        &self.badges
    }

    /// Returns the pending badges and clears them, so one earn is only
    /// announced once.
    pub fn take(&mut self) -> Vec<EarnedBadge> {
        std::mem::take(&mut self.badges)
    }

    pub fn message(&self) -> Option<String> {
        match self.badges.as_slice() {
            [] => None,
            [badge] => Some(format!(
                "Congratulations! You earned the \"{}\" badge!",
                badge.name
            )),
            badges => Some(format!(
                "Congratulations! You earned {} badges!",
                badges.len()
            )),
        }
    }
}
