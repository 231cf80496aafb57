#![no_main]

use libfuzzer_sys::fuzz_target;
use themeconf::config::ThemeOptions;

fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(options) = serde_yaml::from_str::<ThemeOptions>(source) else {
        return;
    };

    // Whatever parses must serialize back to the same selection.
    let rendered = serde_yaml::to_string(&options).expect("serialize parsed theme options");
    let reparsed: ThemeOptions =
        serde_yaml::from_str(&rendered).expect("reparse serialized theme options");
    assert_eq!(options, reparsed);
});
