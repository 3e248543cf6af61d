use std::collections::VecDeque;

use super::BattleAction;

/// Two FIFO queues of battle actions: waiting to animate and animated.
///
/// Only the head of the ready queue is ever handed out mutably, and only
/// [`battle_action_finished_animating`](Self::battle_action_finished_animating)
/// moves actions between the queues.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BattleActionRecorder {
    ready_to_animate: VecDeque<BattleAction>,
    already_animated: Vec<BattleAction>,
}

impl BattleActionRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_ready_to_animate_battle_action(&mut self, action: BattleAction) {
        self.ready_to_animate.push_back(action);
    }

    pub fn peek_at_animation_queue(&self) -> Option<&BattleAction> {
        self.ready_to_animate.front()
    }

    /// The action currently in flight, for lazy resolution.
    pub fn animation_queue_head_mut(&mut self) -> Option<&mut BattleAction> {
        self.ready_to_animate.front_mut()
    }

    /// Retires the head of the ready queue, returning it.
    pub fn battle_action_finished_animating(&mut self) -> Option<&BattleAction> {
        let mut action = self.ready_to_animate.pop_front()?;
        action.animation.completed = true;
        self.already_animated.push(action);
        self.already_animated.last()
    }

    pub fn is_animation_queue_empty(&self) -> bool {
        self.ready_to_animate.is_empty()
    }

    pub fn is_already_animated_queue_empty(&self) -> bool {
        self.already_animated.is_empty()
    }

    pub fn already_animated(&self) -> &[BattleAction] {
        &self.already_animated
    }

    pub fn ready_to_animate_len(&self) -> usize {
        self.ready_to_animate.len()
    }
}
