//! Stability voter
//!
//! Per frame, the rules below are evaluated in order and the first one
//! that fires ends the frame:
//!
//! 1. Any digit released since the previous frame: `ALL_OFF`, always.
//! 2. Every digit down: `ALL_OFF` unless already off.
//! 3. Digits up but no gesture matched: `ALL_OFF` unless already off.
//! 4. Otherwise the label joins the history. Once the history holds
//!    `min_samples` labels, the leader wins if it holds at least
//!    `stability_ratio` of the window, equals this frame's label and its
//!    command differs from the last one issued.
//!
//! A lost hand (no detection or lighting overload) clears the history and
//! is then treated as an all-down frame.

use palmlight_protocol::Command;

use super::history::GestureHistory;
use super::snapshot::FingerSnapshot;
use crate::config::VoterConfig;
use crate::gesture::GestureLabel;
use crate::hand::FingerVector;
use crate::state::{Event, LossCause, OffReason, VoterState};

/// One frame as seen by the voter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Observation {
    /// A hand was tracked and classified
    Hand {
        label: GestureLabel,
        fingers: FingerVector,
    },
    /// No usable hand this frame
    Lost(LossCause),
}

/// A command the voter wants sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Decision {
    pub command: Command,
    /// Event that produced the command
    pub event: Event,
}

/// Debounces gesture labels into commands
#[derive(Debug, Clone)]
pub struct StabilityVoter {
    config: VoterConfig,
    history: GestureHistory,
    snapshot: FingerSnapshot,
    last_command: Option<Command>,
    state: VoterState,
}

impl Default for StabilityVoter {
    fn default() -> Self {
        Self::new(VoterConfig::default())
    }
}

impl StabilityVoter {
    pub fn new(config: VoterConfig) -> Self {
        Self {
            config,
            history: GestureHistory::new(),
            snapshot: FingerSnapshot::new(),
            last_command: None,
            state: VoterState::Idle,
        }
    }

    /// Feed one frame and return the command to issue, if any
    pub fn observe(&mut self, observation: Observation) -> Option<Decision> {
        let (label, fingers, loss) = match observation {
            Observation::Hand { label, fingers } => (label, fingers, None),
            Observation::Lost(cause) => {
                self.history.clear();
                (GestureLabel::None, FingerVector::ALL_DOWN, Some(cause))
            }
        };

        self.snapshot.advance(fingers);

        if let Some(digit) = self.snapshot.released() {
            self.history.clear();
            let reason = match loss {
                Some(cause) => OffReason::HandLost(cause),
                None => OffReason::DigitReleased(digit),
            };
            return Some(self.force_off(reason));
        }

        if fingers.is_all_down() {
            if self.is_off() {
                return None;
            }
            let reason = match loss {
                Some(cause) => OffReason::HandLost(cause),
                None => OffReason::NoDigitsUp,
            };
            return Some(self.force_off(reason));
        }

        let Some(command) = label.command() else {
            if self.is_off() {
                return None;
            }
            return Some(self.force_off(OffReason::UndefinedGesture));
        };

        self.history.push(label);
        self.apply(Event::SampleRecorded(label));

        if self.history.len() < self.config.min_samples as usize {
            return None;
        }
        let vote = self.history.leader()?;
        if vote.label != label || vote.share() < self.config.stability_ratio {
            return None;
        }
        if self.last_command == Some(command) {
            return None;
        }

        self.last_command = Some(command);
        self.history.clear();
        let event = Event::GestureDispatched(label);
        self.apply(event);
        Some(Decision { command, event })
    }

    /// Operator reset
    ///
    /// Clears the history and finger snapshot. The last command is kept so
    /// the dedup rule still applies afterwards.
    pub fn reset(&mut self) {
        self.history.clear();
        self.snapshot.reset();
        self.apply(Event::Reset);
    }

    /// Most recently issued command
    pub fn last_command(&self) -> Option<Command> {
        self.last_command
    }

    pub fn state(&self) -> VoterState {
        self.state
    }

    pub fn snapshot(&self) -> &FingerSnapshot {
        &self.snapshot
    }

    pub fn history(&self) -> &GestureHistory {
        &self.history
    }

    fn is_off(&self) -> bool {
        self.last_command == Some(Command::AllOff)
    }

    fn force_off(&mut self, reason: OffReason) -> Decision {
        self.last_command = Some(Command::AllOff);
        let event = Event::ForcedOff(reason);
        self.apply(event);
        Decision {
            command: Command::AllOff,
            event,
        }
    }

    fn apply(&mut self, event: Event) {
        self.state = self.state.transition(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::classify;
    use crate::hand::Digit;
    use proptest::prelude::*;
    use std::vec::Vec;

    fn hand(fingers: FingerVector) -> Observation {
        Observation::Hand {
            label: classify(&fingers),
            fingers,
        }
    }

    fn run(voter: &mut StabilityVoter, frames: &[Observation]) -> Vec<Command> {
        frames
            .iter()
            .filter_map(|&frame| voter.observe(frame))
            .map(|decision| decision.command)
            .collect()
    }

    #[test]
    fn test_steady_gesture_dispatches_once() {
        let mut voter = StabilityVoter::default();
        let blink = hand(FingerVector::only(&[Digit::Thumb]));

        let commands = run(&mut voter, &[blink; 10]);
        assert_eq!(commands, [Command::Blink]);
        assert_eq!(voter.last_command(), Some(Command::Blink));
        assert_eq!(voter.state(), VoterState::Locked(GestureLabel::Blink));
    }

    #[test]
    fn test_dispatch_on_third_frame() {
        let mut voter = StabilityVoter::default();
        let wave = hand(FingerVector::only(&[Digit::Pinky]));

        assert_eq!(voter.observe(wave), None);
        assert_eq!(voter.observe(wave), None);
        assert_eq!(voter.state(), VoterState::Tracking);

        let decision = voter.observe(wave).unwrap();
        assert_eq!(decision.command, Command::Wave);
        assert_eq!(decision.event, Event::GestureDispatched(GestureLabel::Wave));
        assert!(voter.history().is_empty());
    }

    #[test]
    fn test_release_forces_off_immediately() {
        let mut voter = StabilityVoter::default();
        let strobe = hand(FingerVector::only(&[Digit::Index, Digit::Middle]));
        let running = hand(FingerVector::only(&[Digit::Index]));

        assert_eq!(run(&mut voter, &[strobe; 3]), [Command::Strobe]);

        let decision = voter.observe(running).unwrap();
        assert_eq!(decision.command, Command::AllOff);
        assert_eq!(
            decision.event,
            Event::ForcedOff(OffReason::DigitReleased(Digit::Middle))
        );
        assert_eq!(voter.state(), VoterState::Idle);
        assert!(voter.history().is_empty());
    }

    #[test]
    fn test_release_fires_even_when_already_off() {
        let mut voter = StabilityVoter::default();
        let open = hand(FingerVector::ALL_UP);
        let fist = hand(FingerVector::ALL_DOWN);

        assert_eq!(voter.observe(fist).unwrap().command, Command::AllOff);
        // Four-up frame classifies as none and it is already off
        let four = hand(FingerVector::only(&[
            Digit::Thumb,
            Digit::Index,
            Digit::Middle,
            Digit::Ring,
        ]));
        assert_eq!(voter.observe(four), None);

        // Dropping the thumb is a release edge
        let three = hand(FingerVector::only(&[Digit::Index, Digit::Middle, Digit::Ring]));
        assert_eq!(voter.observe(three).unwrap().command, Command::AllOff);

        assert_eq!(voter.observe(open), None);
    }

    #[test]
    fn test_ring_drop_from_open_hand() {
        let mut voter = StabilityVoter::default();
        let open = hand(FingerVector::ALL_UP);
        let ring_down = hand(FingerVector::new([true, true, true, false, true]));

        assert_eq!(voter.observe(open), None);
        let decision = voter.observe(ring_down).unwrap();
        assert_eq!(decision.command, Command::AllOff);
        assert_eq!(
            decision.event,
            Event::ForcedOff(OffReason::DigitReleased(Digit::Ring))
        );
    }

    #[test]
    fn test_first_fist_forces_off_once() {
        let mut voter = StabilityVoter::default();
        let fist = hand(FingerVector::ALL_DOWN);

        let commands = run(&mut voter, &[fist; 5]);
        assert_eq!(commands, [Command::AllOff]);
    }

    #[test]
    fn test_undefined_gesture_forces_off() {
        let mut voter = StabilityVoter::default();
        let rainbow = hand(FingerVector::only(&[Digit::Ring]));
        assert_eq!(run(&mut voter, &[rainbow; 3]), [Command::Rainbow]);

        // Adding digits is not a release; four up matches nothing
        let four = hand(FingerVector::only(&[
            Digit::Index,
            Digit::Middle,
            Digit::Ring,
            Digit::Pinky,
        ]));
        let decision = voter.observe(four).unwrap();
        assert_eq!(decision.command, Command::AllOff);
        assert_eq!(decision.event, Event::ForcedOff(OffReason::UndefinedGesture));

        assert_eq!(voter.observe(four), None);
    }

    #[test]
    fn test_hand_loss_forces_off_once() {
        let mut voter = StabilityVoter::default();
        let fade = hand(FingerVector::only(&[Digit::Thumb, Digit::Index]));
        assert_eq!(run(&mut voter, &[fade; 3]), [Command::Fade]);

        let lost = Observation::Lost(LossCause::NoHand);
        let decision = voter.observe(lost).unwrap();
        assert_eq!(decision.command, Command::AllOff);
        assert_eq!(
            decision.event,
            Event::ForcedOff(OffReason::HandLost(LossCause::NoHand))
        );

        assert!(run(&mut voter, &[lost; 5]).is_empty());
    }

    #[test]
    fn test_hand_loss_clears_partial_votes() {
        let mut voter = StabilityVoter::default();
        let fist = hand(FingerVector::ALL_DOWN);
        let open = hand(FingerVector::ALL_UP);
        voter.observe(fist);

        voter.observe(open);
        voter.observe(open);
        assert_eq!(voter.history().len(), 2);

        // Overload while tracking: the release edge fires and the
        // partial window is gone
        let decision = voter.observe(Observation::Lost(LossCause::Overload)).unwrap();
        assert_eq!(
            decision.event,
            Event::ForcedOff(OffReason::HandLost(LossCause::Overload))
        );
        assert!(voter.history().is_empty());

        // Needs three fresh frames again
        assert!(run(&mut voter, &[open; 2]).is_empty());
        assert_eq!(voter.observe(open).unwrap().command, Command::AllOn);
    }

    #[test]
    fn test_lost_with_empty_snapshot_clears_history() {
        let mut voter = StabilityVoter::default();
        voter.observe(Observation::Lost(LossCause::NoHand));
        assert!(voter.history().is_empty());
        assert_eq!(voter.last_command(), Some(Command::AllOff));
    }

    #[test]
    fn test_flicker_is_suppressed() {
        let mut voter = StabilityVoter::default();
        let fingers = FingerVector::only(&[Digit::Thumb, Digit::Middle, Digit::Ring]);
        // Four labels in rotation: no label ever holds half the window
        let labels = [
            GestureLabel::Twinkle,
            GestureLabel::Strobe,
            GestureLabel::Fade,
            GestureLabel::Wave,
        ];

        let frames: Vec<_> = (0..30)
            .map(|i| Observation::Hand {
                label: labels[i % labels.len()],
                fingers,
            })
            .collect();
        assert!(run(&mut voter, &frames).is_empty());
        assert_eq!(voter.history().len(), crate::config::HISTORY_CAPACITY);
    }

    #[test]
    fn test_none_twinkle_alternation() {
        let mut voter = StabilityVoter::default();
        let fingers = FingerVector::only(&[Digit::Thumb, Digit::Middle, Digit::Ring]);

        // None frames never vote and force off after each dispatch; the
        // twinkle frames reach three samples every sixth frame
        let frames: Vec<_> = (0..15)
            .map(|i| Observation::Hand {
                label: if i % 2 == 0 {
                    GestureLabel::None
                } else {
                    GestureLabel::Twinkle
                },
                fingers,
            })
            .collect();
        assert_eq!(
            run(&mut voter, &frames),
            [
                Command::AllOff,
                Command::Twinkle,
                Command::AllOff,
                Command::Twinkle,
                Command::AllOff,
            ]
        );
    }

    #[test]
    fn test_leader_must_match_current_frame() {
        let mut voter = StabilityVoter::default();
        let fingers = FingerVector::only(&[Digit::Thumb, Digit::Index, Digit::Middle]);
        let frame = |label| Observation::Hand { label, fingers };

        voter.observe(frame(GestureLabel::Twinkle));
        voter.observe(frame(GestureLabel::Twinkle));
        // Twinkle leads 2/3 but this frame says wave
        assert_eq!(voter.observe(frame(GestureLabel::Wave)), None);
        assert_eq!(
            voter.observe(frame(GestureLabel::Twinkle)).unwrap().command,
            Command::Twinkle
        );
    }

    #[test]
    fn test_same_command_not_repeated_after_window_restart() {
        let mut voter = StabilityVoter::default();
        let open = hand(FingerVector::ALL_UP);

        let commands = run(&mut voter, &[open; 30]);
        assert_eq!(commands, [Command::AllOn]);
    }

    #[test]
    fn test_gesture_change_without_release() {
        let mut voter = StabilityVoter::default();
        let running = hand(FingerVector::only(&[Digit::Index]));
        let strobe = hand(FingerVector::only(&[Digit::Index, Digit::Middle]));

        assert_eq!(run(&mut voter, &[running; 3]), [Command::Chase]);
        assert_eq!(run(&mut voter, &[strobe; 3]), [Command::Strobe]);
    }

    #[test]
    fn test_reset_keeps_last_command() {
        let mut voter = StabilityVoter::default();
        let breathing = hand(FingerVector::only(&[Digit::Middle]));
        assert_eq!(run(&mut voter, &[breathing; 3]), [Command::Breathe]);

        voter.reset();
        assert_eq!(voter.snapshot(), &FingerSnapshot::new());
        assert_eq!(voter.last_command(), Some(Command::Breathe));

        // Same gesture after reset is still deduplicated
        assert!(run(&mut voter, &[breathing; 5]).is_empty());
    }

    #[test]
    fn test_reset_abandons_candidate() {
        let mut voter = StabilityVoter::default();
        let wave = hand(FingerVector::only(&[Digit::Pinky]));
        voter.observe(wave);
        voter.observe(wave);
        assert_eq!(voter.state(), VoterState::Tracking);

        voter.reset();
        assert_eq!(voter.state(), VoterState::Idle);
        assert!(voter.history().is_empty());
    }

    #[test]
    fn test_stricter_config() {
        let config = VoterConfig {
            min_samples: 5,
            stability_ratio: 1.0,
        };
        let mut voter = StabilityVoter::new(config);
        let blink = hand(FingerVector::only(&[Digit::Thumb]));

        assert!(run(&mut voter, &[blink; 4]).is_empty());
        assert_eq!(voter.observe(blink).unwrap().command, Command::Blink);
    }

    fn any_fingers() -> impl Strategy<Value = FingerVector> {
        proptest::array::uniform5(any::<bool>()).prop_map(FingerVector::new)
    }

    proptest! {
        #[test]
        fn prop_release_always_forces_off(
            frames in proptest::collection::vec(any_fingers(), 1..60)
        ) {
            let mut voter = StabilityVoter::default();
            let mut previous = FingerVector::ALL_DOWN;
            for fingers in frames {
                let decision = voter.observe(hand(fingers));
                if fingers.first_release_from(&previous).is_some() {
                    prop_assert_eq!(decision.map(|d| d.command), Some(Command::AllOff));
                }
                previous = fingers;
            }
        }

        #[test]
        fn prop_never_repeats_gesture_command(
            frames in proptest::collection::vec(any_fingers(), 1..60)
        ) {
            let mut voter = StabilityVoter::default();
            let mut last: Option<Command> = None;
            for fingers in frames {
                if let Some(decision) = voter.observe(hand(fingers)) {
                    if let Event::GestureDispatched(_) = decision.event {
                        prop_assert_ne!(Some(decision.command), last);
                    }
                    last = Some(decision.command);
                }
            }
        }

        #[test]
        fn prop_history_stays_bounded(
            frames in proptest::collection::vec(any_fingers(), 1..100)
        ) {
            let mut voter = StabilityVoter::default();
            for fingers in frames {
                voter.observe(hand(fingers));
                prop_assert!(voter.history().len() <= crate::config::HISTORY_CAPACITY);
            }
        }
    }
}
