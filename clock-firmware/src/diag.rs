// Diagnose-Ausgaben
//
// Beide Funktionen schreiben über defmt (Debug-Level) und sind ohne das
// Cargo-Feature `debug-output` leere Funktionen, die der Compiler entfernt.

use crate::config::DEBUG_OUTPUT;

/// Gibt eine Diagnose-Meldung aus
#[inline(always)]
pub fn debug_msg(message: &str) {
    if DEBUG_OUTPUT {
        defmt::debug!("{=str}", message);
    }
}

/// Gibt eine Diagnose-Meldung mit einem Wert aus
#[inline(always)]
pub fn debug_value<T: defmt::Format>(message: &str, value: T) {
    if DEBUG_OUTPUT {
        defmt::debug!("{=str}{}", message, value);
    }
}
