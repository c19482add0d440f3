//! Timer setup for PWM generation and the alternation tick, using direct PAC register access.
//!
//! - [`PwmTimer`] configures an advanced timer (TIM1/TIM8) edge-aligned, up-counting and
//!   continuous, and hands out [`PwmChannel`]s in PWM mode 1.
//! - [`TickTimer`] configures TIM3 as a free-running update source whose overflow flag is the
//!   alternator's [`IrqFlag`].

use core::convert::Infallible;
use core::marker::PhantomData;

use embedded_hal::pwm::{ErrorType, SetDutyCycle};
use stm32f7xx_hal::pac::{self, tim1};

use crate::config::TimerConfig;
use crate::irq::{rc_w0_clear, IrqFlag};

/// CR1: auto-reload preload. CKD=00, CMS=00 (edge), DIR=0 (up), OPM=0 (continuous).
const CR1_ARPE: u32 = 1 << 7;

/// SR: update interrupt flag (rc_w0).
const SR_UIF: u32 = 1 << 0;

/// CCMRx output-compare mode field value for PWM mode 1.
const OCM_PWM1: u32 = 0b110;

/// Advanced-control timers sharing the TIM1 register layout.
pub trait AdvancedTimer {
    fn regs() -> &'static tim1::RegisterBlock;
}

impl AdvancedTimer for pac::TIM1 {
    #[inline]
    fn regs() -> &'static tim1::RegisterBlock {
        unsafe { &*pac::TIM1::ptr() }
    }
}

impl AdvancedTimer for pac::TIM8 {
    #[inline]
    fn regs() -> &'static tim1::RegisterBlock {
        unsafe { &*pac::TIM8::ptr() }
    }
}

/// Advanced timer configured for PWM output.
pub struct PwmTimer<TIM> {
    tim: TIM,
}

impl<TIM: AdvancedTimer> PwmTimer<TIM> {
    /// Configure prescaler and period. The counter stays stopped until [`start`](Self::start).
    pub fn new(tim: TIM, cfg: TimerConfig) -> Self {
        let regs = TIM::regs();

        // Disable counter while configuring
        regs.cr1.modify(|_, w| w.cen().clear_bit());
        regs.cr1.write(|w| unsafe { w.bits(CR1_ARPE) });

        regs.psc.write(|w| unsafe { w.bits(cfg.prescaler as u32) });
        regs.arr.write(|w| unsafe { w.bits(cfg.period as u32) });

        // Latch PSC/ARR now instead of at the first overflow, then drop the UIF it raised
        regs.egr.write(|w| w.ug().set_bit());
        regs.sr.write(|w| unsafe { w.bits(0) });

        Self { tim }
    }

    /// Put channel `C` (1..=4) into PWM mode 1 with preload and enable its output.
    pub fn channel<const C: u8>(&mut self) -> PwmChannel<TIM, C> {
        assert!((1..=4).contains(&C));
        let regs = TIM::regs();

        // CCxS=00 (output), OCxPE=1, OCxM=PWM1, OCxM_3=0
        let shift = (((C - 1) % 2) as u32) * 8;
        let mask = ((1 << 16) | (0b111 << 4) | (1 << 3) | 0b11) << shift;
        let mode = ((OCM_PWM1 << 4) | (1 << 3)) << shift;

        if C <= 2 {
            regs.ccmr1_output()
                .modify(|r, w| unsafe { w.bits((r.bits() & !mask) | mode) });
        } else {
            regs.ccmr2_output()
                .modify(|r, w| unsafe { w.bits((r.bits() & !mask) | mode) });
        }

        // CCxE, active-high polarity
        let ccer = 1 << ((C as u32 - 1) * 4);
        regs.ccer.modify(|r, w| unsafe { w.bits(r.bits() | ccer) });

        PwmChannel { _tim: PhantomData }
    }

    /// Set main output enable and start counting.
    pub fn start(&mut self) {
        let regs = TIM::regs();
        regs.bdtr.modify(|_, w| w.moe().set_bit());
        regs.cr1.modify(|_, w| w.cen().set_bit());
    }

    /// Consume the wrapper and return the underlying timer peripheral.
    #[inline]
    pub fn free(self) -> TIM {
        self.tim
    }
}

/// One output-compare channel of an advanced timer.
pub struct PwmChannel<TIM, const C: u8> {
    _tim: PhantomData<TIM>,
}

impl<TIM: AdvancedTimer, const C: u8> ErrorType for PwmChannel<TIM, C> {
    type Error = Infallible;
}

impl<TIM: AdvancedTimer, const C: u8> SetDutyCycle for PwmChannel<TIM, C> {
    /// `ARR + 1`: a compare value past the period keeps the output high for the whole frame.
    fn max_duty_cycle(&self) -> u16 {
        (TIM::regs().arr.read().bits() as u16).saturating_add(1)
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        let regs = TIM::regs();
        let bits = duty as u32;
        match C {
            1 => regs.ccr1.write(|w| unsafe { w.bits(bits) }),
            2 => regs.ccr2.write(|w| unsafe { w.bits(bits) }),
            3 => regs.ccr3.write(|w| unsafe { w.bits(bits) }),
            _ => regs.ccr4.write(|w| unsafe { w.bits(bits) }),
        }
        Ok(())
    }
}

/// General-purpose timer used only for its update interrupt.
pub struct TickTimer<TIM> {
    tim: TIM,
}

impl TickTimer<pac::TIM3> {
    /// Configure TIM3 as an up-counting update source. The counter stays stopped.
    pub fn tim3(tim3: pac::TIM3, cfg: TimerConfig) -> Self {
        let tim = tim3;

        tim.cr1.modify(|_, w| w.cen().clear_bit());
        tim.cr1.write(|w| unsafe { w.bits(CR1_ARPE) });

        tim.psc.write(|w| unsafe { w.bits(cfg.prescaler as u32) });
        tim.arr.write(|w| unsafe { w.bits(cfg.period as u32) });

        tim.egr.write(|w| w.ug().set_bit());
        tim.sr.write(|w| unsafe { w.bits(rc_w0_clear(SR_UIF)) });

        Self { tim }
    }

    /// Enable the update interrupt request (UIE).
    #[inline]
    pub fn listen(&mut self) {
        self.tim.dier.modify(|_, w| w.uie().set_bit());
    }

    #[inline]
    pub fn start(&mut self) {
        self.tim.cr1.modify(|_, w| w.cen().set_bit());
    }

    #[inline]
    pub fn free(self) -> pac::TIM3 {
        self.tim
    }
}

impl IrqFlag for TickTimer<pac::TIM3> {
    #[inline]
    fn is_pending(&self) -> bool {
        self.tim.sr.read().uif().bit_is_set()
    }

    #[inline]
    fn clear_pending(&mut self) {
        self.tim.sr.write(|w| unsafe { w.bits(rc_w0_clear(SR_UIF)) });
    }
}
