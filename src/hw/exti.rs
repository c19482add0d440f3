// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! External interrupt (EXTI) line routed from a GPIO pin.
//!
//! Configures SYSCFG port selection, edge triggers and the interrupt mask for one line and exposes
//! the line's pending bit as an [`IrqFlag`]. The SYSCFG clock must be enabled beforehand.

use stm32f7xx_hal::pac;

use crate::config::EdgeSource;
use crate::irq::IrqFlag;

/// Which transitions latch the line.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Edge {
    Rising,
    Falling,
    Both,
}

pub struct ExtiLine {
    exti: pac::EXTI,
    line: u8,
}

impl ExtiLine {
    /// Route pin `line` of `source` onto EXTI line `line` and unmask it.
    pub fn new(
        exti: pac::EXTI,
        syscfg: &pac::SYSCFG,
        line: u8,
        source: EdgeSource,
        edge: Edge,
    ) -> Self {
        assert!(line < 16);
        let mask = 1u32 << line;

        // EXTICRx: 4-bit port selector per line
        let shift = ((line % 4) as u32) * 4;
        let select = |r: u32| (r & !(0xF << shift)) | (source.exticr_bits() << shift);
        match line / 4 {
            0 => syscfg.exticr1.modify(|r, w| unsafe { w.bits(select(r.bits())) }),
            1 => syscfg.exticr2.modify(|r, w| unsafe { w.bits(select(r.bits())) }),
            2 => syscfg.exticr3.modify(|r, w| unsafe { w.bits(select(r.bits())) }),
            _ => syscfg.exticr4.modify(|r, w| unsafe { w.bits(select(r.bits())) }),
        }

        let rising = matches!(edge, Edge::Rising | Edge::Both);
        let falling = matches!(edge, Edge::Falling | Edge::Both);
        exti.rtsr.modify(|r, w| unsafe {
            w.bits(if rising { r.bits() | mask } else { r.bits() & !mask })
        });
        exti.ftsr.modify(|r, w| unsafe {
            w.bits(if falling { r.bits() | mask } else { r.bits() & !mask })
        });

        // Drop anything latched during pin setup, then unmask
        exti.pr.write(|w| unsafe { w.bits(mask) });
        exti.imr.modify(|r, w| unsafe { w.bits(r.bits() | mask) });

        Self { exti, line }
    }

    #[inline]
    pub fn line(&self) -> u8 {
        self.line
    }

    #[inline]
    fn mask(&self) -> u32 {
        1 << self.line
    }

    pub fn free(self) -> pac::EXTI {
        self.exti
    }
}

impl IrqFlag for ExtiLine {
    #[inline]
    fn is_pending(&self) -> bool {
        self.exti.pr.read().bits() & self.mask() != 0
    }

    /// PR is write-1-to-clear.
    #[inline]
    fn clear_pending(&mut self) {
        let mask = self.mask();
        self.exti.pr.write(|w| unsafe { w.bits(mask) });
    }
}
