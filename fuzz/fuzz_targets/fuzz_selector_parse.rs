#![no_main]

use libfuzzer_sys::fuzz_target;
use pagefx_core::{Dom, MemoryDom, Selector};

fuzz_target!(|data: &str| {
    let Ok(selector) = data.parse::<Selector>() else {
        return;
    };
    // Anything that parses renders back to something that parses the same.
    let rendered = selector.to_string();
    let reparsed: Selector = rendered.parse().expect("rendered selector parses");
    assert_eq!(reparsed, selector);

    // Usable as an element spec without panicking.
    let dom = MemoryDom::new();
    let node = dom.append_element(dom.body(), &selector);
    let _ = dom.matches(node, &selector);
});
