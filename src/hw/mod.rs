pub mod output;

#[cfg(target_os = "none")]
pub mod exti;
#[cfg(target_os = "none")]
pub mod gpio;
#[cfg(target_os = "none")]
pub mod pins;
#[cfg(target_os = "none")]
pub mod timer;
#[cfg(target_os = "none")]
pub mod usart;

pub use output::{ActiveLevel, EnableLine};

#[cfg(target_os = "none")]
pub use exti::ExtiLine;
#[cfg(target_os = "none")]
pub use gpio::{OutputLine, PortBit};
#[cfg(target_os = "none")]
pub use timer::{PwmChannel, PwmTimer, TickTimer};
#[cfg(target_os = "none")]
pub use usart::TraceUart;
