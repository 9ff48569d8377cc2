use crate::codec::Variant;
use crate::error::Error;
use std::str::FromStr;

/// Packet size used when splitting a stream: one full COBS block.
pub const DEFAULT_PACKET_SIZE: usize = 254;

#[derive(Debug, Clone)]
pub struct FrameConfig {
    pub variant: Variant,
    pub max_packet_size: usize,
    pub threads: usize,
    pub show_progress: bool,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Cobs,
            max_packet_size: DEFAULT_PACKET_SIZE,
            threads: num_cpus::get(),
            show_progress: false,
        }
    }
}

impl FrameConfig {
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_packet_size(mut self, max_packet_size: usize) -> Self {
        self.max_packet_size = max_packet_size;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.max_packet_size == 0 {
            return Err(Error::Config("packet size must be at least 1 byte".to_string()));
        }
        if self.threads == 0 {
            return Err(Error::Config("thread count must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl FromStr for Variant {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cobs" => Ok(Variant::Cobs),
            "cobsr" | "cobs/r" => Ok(Variant::CobsR),
            _ => Err(Error::Config(format!("Invalid variant: {}", s))),
        }
    }
}
