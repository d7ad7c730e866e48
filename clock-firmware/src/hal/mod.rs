// Hardware Abstraction Layer (HAL) Module
//
// Dieses Modul kapselt Hardware-Zugriffe hinter dem SegmentStripWriter-Trait
// aus clock-core, um Testbarkeit und Wartbarkeit zu verbessern.

pub mod led_writer;

pub use led_writer::{RmtStripWriter, STRIP_BUFFER_SIZE};
