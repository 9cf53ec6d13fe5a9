pub mod cpu;
pub mod history;

pub use cpu::CpuUsageWidget;
