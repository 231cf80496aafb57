#![no_main]

use libfuzzer_sys::fuzz_target;
use themeconf::config::ConfigLoader;

fuzz_target!(|data: &[u8]| {
    if let Ok(source) = std::str::from_utf8(data) {
        let loader = ConfigLoader::with_defaults();

        // Any outcome is fine as long as the loader does not panic.
        let _ = loader.load_from_str(source);
    }
});
