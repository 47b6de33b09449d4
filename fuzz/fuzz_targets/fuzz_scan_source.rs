// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Import scanning must accept any text

#![no_main]

use codemapper::imports::scan_source;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    for reference in scan_source(&text) {
        assert!(reference.specifier.starts_with('.'));
        let _ = reference.target_name("ts");
    }
});
