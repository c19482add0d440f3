// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

#![cfg_attr(target_os = "none", no_std, no_main)]

#[cfg(target_os = "none")]
mod firmware {
    use cortex_m_rt::entry;
    use defmt_rtt as _;
    use panic_halt as _;

    use hbridge_pwm::board::{self, Motor, Sampler};
    use hbridge_pwm::irq::IrqSlot;
    use stm32f7xx_hal::{interrupt, pac};

    static MOTOR: IrqSlot<Motor> = IrqSlot::new();
    static EDGE: IrqSlot<Sampler> = IrqSlot::new();

    #[entry]
    fn main() -> ! {
        // Peripherals
        let dp = pac::Peripherals::take().unwrap();
        let mut cp = cortex_m::Peripherals::take().unwrap();

        let board = board::bring_up(dp);

        // Handler state must be in place before either line is unmasked
        MOTOR.install(board.motor);
        EDGE.install(board.sampler);
        board::arm_interrupts(&mut cp.NVIC);

        loop {
            cortex_m::asm::nop();
        }
    }

    #[interrupt]
    fn TIM3() {
        if let Some(Ok(Some(dir))) = MOTOR.with(|m| m.on_update()) {
            defmt::trace!("direction {}", dir);
        }
    }

    #[interrupt]
    fn EXTI0() {
        match EDGE.with(|s| (s.on_edge(), s.trace().dropped())) {
            Some((Ok(Some(level)), 0)) => defmt::trace!("edge {}", level),
            Some((Ok(Some(level)), dropped)) => {
                defmt::warn!("edge {}, {} trace bytes dropped so far", level, dropped)
            }
            Some((Err(_), _)) => defmt::warn!("edge pin read failed"),
            _ => {}
        }
    }
}

#[cfg(not(target_os = "none"))]
fn main() {}
