#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pagefx_core::{Dom, MemoryDom};
use pagefx_widgets::{DomIndicators, DomPositioner, Slider};

#[derive(Debug, Arbitrary)]
enum Op {
    Next,
    Prev,
    GoTo(u8),
    ClickDot(u8),
    RetagDot(u8, u8),
}

#[derive(Debug, Arbitrary)]
struct Input {
    slides: u8,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let n = usize::from(input.slides % 12) + 1;
    let dom = MemoryDom::new();
    let slides: Vec<_> = (0..n).map(|_| dom.append(dom.body(), ".slide")).collect();
    let dots = dom.append(dom.body(), ".dots");
    let mut slider = Slider::new(
        slides,
        DomPositioner::new(dom.clone()),
        DomIndicators::new(dom.clone(), dots, "dots__dot", "dots__dot--active"),
    )
    .expect("non-empty slider mounts");

    for op in input.ops {
        let before = slider.current_slide();
        let result = match op {
            Op::Next => slider.next(),
            Op::Prev => slider.prev(),
            Op::GoTo(i) => slider.go_to(usize::from(i)),
            Op::ClickDot(i) => {
                let children = dom.children(dots);
                match children.get(usize::from(i) % children.len()) {
                    Some(dot) => slider.activate_indicator(*dot).map(|_| ()),
                    None => Ok(()),
                }
            }
            Op::RetagDot(i, tag) => {
                let children = dom.children(dots);
                if let Some(dot) = children.get(usize::from(i) % children.len()) {
                    dom.set_attribute(*dot, "data-slide", &tag.to_string());
                }
                Ok(())
            }
        };
        assert!(slider.current_slide() < n);
        if result.is_err() {
            assert_eq!(slider.current_slide(), before);
        }
    }
});
