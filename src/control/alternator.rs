// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Periodic direction alternator for the H-bridge.
//!
//! Serviced from the alternation timer's update interrupt. Each serviced update flips the
//! direction state and swaps which H-bridge input carries the drive duty, producing a two-phase
//! forward/reverse signal at the tick rate.
//!
//! Ordering inside [`Alternator::on_update`]:
//!
//! 1. return if the update flag is not pending;
//! 2. clear the flag;
//! 3. flip the state;
//! 4. write IN1, then IN2.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::drivers::hbridge::{Direction, HBridge};
use crate::irq::IrqFlag;

pub struct Alternator<F, IN1, IN2, EN>
where
    EN: OutputPin,
{
    flag: F,
    bridge: HBridge<IN1, IN2, EN>,
    /// `true` while IN1 (forward) carries the drive duty.
    forward: bool,
    toggles: u32,
}

impl<F, IN1, IN2, EN> Alternator<F, IN1, IN2, EN>
where
    F: IrqFlag,
    IN1: SetDutyCycle,
    IN2: SetDutyCycle<Error = IN1::Error>,
    EN: OutputPin,
{
    /// Bind the tick source to a bridge. The state starts out `false` (reverse phase), so the
    /// first serviced update selects forward.
    pub fn new(flag: F, bridge: HBridge<IN1, IN2, EN>) -> Self {
        Self {
            flag,
            bridge,
            forward: false,
            toggles: 0,
        }
    }

    /// Service one update interrupt.
    ///
    /// Returns the direction that was written, or `None` if the flag was not pending. If a duty
    /// write fails the flag is already acknowledged and the state already flipped.
    pub fn on_update(&mut self) -> Result<Option<Direction>, IN1::Error> {
        if !self.flag.is_pending() {
            return Ok(None);
        }
        self.flag.clear_pending();

        self.forward = !self.forward;
        self.toggles = self.toggles.wrapping_add(1);

        let direction = if self.forward {
            Direction::Forward
        } else {
            Direction::Reverse
        };
        self.bridge.drive(direction)?;

        Ok(Some(direction))
    }

    #[inline]
    pub fn is_forward(&self) -> bool {
        self.forward
    }

    /// Number of serviced updates (wrapping).
    #[inline]
    pub fn toggles(&self) -> u32 {
        self.toggles
    }

    #[inline]
    pub fn bridge(&self) -> &HBridge<IN1, IN2, EN> {
        &self.bridge
    }

    pub fn free(self) -> (F, HBridge<IN1, IN2, EN>) {
        (self.flag, self.bridge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hw::EnableLine;
    use crate::mock::{Event, EventLog, MockFlag, MockOutput, MockPwm};

    type TestAlternator = Alternator<MockFlag, MockPwm, MockPwm, MockOutput>;

    fn alternator() -> (TestAlternator, MockFlag, MockPwm, MockPwm) {
        let flag = MockFlag::new();
        let in1 = MockPwm::new(2400);
        let in2 = MockPwm::new(2400);
        let enable = EnableLine::active_high(MockOutput::new()).unwrap();
        let bridge = HBridge::new(in1.clone(), in2.clone(), enable, 1200);
        (Alternator::new(flag.clone(), bridge), flag, in1, in2)
    }

    #[test]
    fn state_follows_parity_of_serviced_updates() {
        let (mut alt, flag, in1, in2) = alternator();
        assert!(!alt.is_forward());

        for n in 1..=9u32 {
            flag.raise();
            alt.on_update().unwrap();

            let forward = n % 2 == 1;
            assert_eq!(alt.is_forward(), forward, "after update {n}");
            assert_eq!(in1.duty() != 0, forward, "IN1 after update {n}");
            assert_eq!(in2.duty() != 0, !forward, "IN2 after update {n}");
        }
        assert_eq!(alt.toggles(), 9);
    }

    #[test]
    fn first_update_selects_forward() {
        let (mut alt, flag, in1, in2) = alternator();
        flag.raise();
        assert_eq!(alt.on_update().unwrap(), Some(Direction::Forward));
        assert_eq!(in1.writes(), vec![1200]);
        assert_eq!(in2.writes(), vec![0]);
    }

    #[test]
    fn flag_is_cleared_once_per_serviced_update() {
        let (mut alt, flag, _, _) = alternator();
        flag.raise();
        alt.on_update().unwrap();
        assert!(!flag.is_pending());
        assert_eq!(flag.clears(), 1);
    }

    #[test]
    fn update_without_pending_flag_is_a_no_op() {
        let (mut alt, flag, in1, in2) = alternator();
        flag.raise();
        alt.on_update().unwrap();

        assert_eq!(alt.on_update().unwrap(), None);
        assert!(alt.is_forward());
        assert_eq!(alt.toggles(), 1);
        assert_eq!(flag.clears(), 1);
        assert_eq!(in1.writes().len(), 1);
        assert_eq!(in2.writes().len(), 1);
    }

    #[test]
    fn exactly_two_writes_per_update() {
        let (mut alt, flag, in1, in2) = alternator();
        for _ in 0..4 {
            flag.raise();
            alt.on_update().unwrap();
        }
        assert_eq!(in1.writes(), vec![1200, 0, 1200, 0]);
        assert_eq!(in2.writes(), vec![0, 1200, 0, 1200]);
    }

    #[test]
    fn updates_from_competing_contexts_stay_paired() {
        use crate::irq::IrqSlot;
        use std::sync::Arc;
        use std::thread;

        let (alt, flag, in1, in2) = alternator();
        let slot = Arc::new(IrqSlot::new());
        slot.install(alt);

        let workers: Vec<_> = (0..2)
            .map(|_| {
                let (slot, flag, in1, in2) = (Arc::clone(&slot), flag.clone(), in1.clone(), in2.clone());
                thread::spawn(move || {
                    for _ in 0..100 {
                        slot.with(|alt: &mut TestAlternator| {
                            let before = (in1.writes().len(), in2.writes().len());
                            flag.raise();
                            alt.on_update().unwrap();
                            assert_eq!(in1.writes().len(), before.0 + 1);
                            assert_eq!(in2.writes().len(), before.1 + 1);
                            assert_eq!(in1.duty() != 0, alt.is_forward());
                        });
                    }
                })
            })
            .collect();
        for w in workers {
            w.join().unwrap();
        }

        assert_eq!(slot.with(|alt| alt.toggles()), Some(200));
        assert_eq!(slot.with(|alt| alt.is_forward()), Some(false));
    }

    #[test]
    fn flag_is_acknowledged_before_duty_writes() {
        let log = EventLog::new();
        let flag = MockFlag::logged(&log);
        let in1 = MockPwm::logged(2400, "in1", &log);
        let in2 = MockPwm::logged(2400, "in2", &log);
        let enable = EnableLine::active_high(MockOutput::new()).unwrap();
        let mut alt = Alternator::new(flag.clone(), HBridge::new(in1, in2, enable, 1200));

        flag.raise();
        alt.on_update().unwrap();
        flag.raise();
        alt.on_update().unwrap();

        assert_eq!(
            log.events(),
            vec![
                Event::Clear,
                Event::Duty("in1", 1200),
                Event::Duty("in2", 0),
                Event::Clear,
                Event::Duty("in1", 0),
                Event::Duty("in2", 1200),
            ]
        );
        assert_eq!(alt.bridge().direction(), Some(Direction::Reverse));
    }
}
