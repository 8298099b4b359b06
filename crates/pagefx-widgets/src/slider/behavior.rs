#![forbid(unsafe_code)]

//! Binds a [`Slider`] to page elements and input.

use pagefx_core::{Dom, Event, NodeId, Outcome, PageError, Selector};

use super::dom::{DomIndicators, DomPositioner};
use super::{Slider, SliderKeys};
use crate::Behavior;

/// Where the slider lives on the page.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct SliderConfig {
    pub slide: Selector,
    pub button_left: Selector,
    pub button_right: Selector,
    pub dots: Selector,
    pub dot_class: String,
    pub dot_active_class: String,
    pub keys: SliderKeys,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            slide: Selector::class("slide"),
            button_left: Selector::class("slider__btn--left"),
            button_right: Selector::class("slider__btn--right"),
            dots: Selector::class("dots"),
            dot_class: "dots__dot".into(),
            dot_active_class: "dots__dot--active".into(),
            keys: SliderKeys::default(),
        }
    }
}

impl SliderConfig {
    #[must_use]
    pub fn keys(mut self, keys: SliderKeys) -> Self {
        self.keys = keys;
        self
    }

    #[must_use]
    pub fn slide(mut self, slide: Selector) -> Self {
        self.slide = slide;
        self
    }
}

type DomSlider<D> = Slider<DomPositioner<D>, DomIndicators<D>>;

/// Slider mounted on the page: arrow buttons, keys and indicator dots.
#[derive(Debug)]
pub struct SliderBehavior<D: Dom> {
    dom: D,
    slider: DomSlider<D>,
    button_left: NodeId,
    button_right: NodeId,
}

impl<D: Dom + Clone> SliderBehavior<D> {
    /// Resolve the slider's elements and show the first slide.
    pub fn mount(dom: D, config: &SliderConfig) -> Result<Self, PageError> {
        let button_left = dom.require(&config.button_left)?;
        let button_right = dom.require(&config.button_right)?;
        let dots = dom.require(&config.dots)?;
        let slides = dom.query_all(&config.slide);

        let slider = Slider::new(
            slides,
            DomPositioner::new(dom.clone()),
            DomIndicators::new(
                dom.clone(),
                dots,
                config.dot_class.as_str(),
                config.dot_active_class.as_str(),
            ),
        )?
        .with_keys(config.keys);

        Ok(Self {
            dom,
            slider,
            button_left,
            button_right,
        })
    }
}

impl<D: Dom> SliderBehavior<D> {
    pub fn slider(&self) -> &DomSlider<D> {
        &self.slider
    }

    pub fn slider_mut(&mut self) -> &mut DomSlider<D> {
        &mut self.slider
    }
}

impl<D: Dom> Behavior for SliderBehavior<D> {
    fn name(&self) -> &'static str {
        "slider"
    }

    fn handle_event(&mut self, event: &Event) -> Result<Outcome, PageError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("behavior_event", behavior = "slider").entered();

        match event {
            Event::Key(key) => {
                let stepped = self.slider.handle_key(key)?;
                Ok(if stepped { Outcome::HANDLED } else { Outcome::IGNORED })
            }
            Event::Click(click) => {
                let target = click.target;
                if self.dom.contains(self.button_right, target) {
                    self.slider.next()?;
                    return Ok(Outcome::HANDLED);
                }
                if self.dom.contains(self.button_left, target) {
                    self.slider.prev()?;
                    return Ok(Outcome::HANDLED);
                }
                match self.slider.activate_indicator(target)? {
                    Some(_) => Ok(Outcome::HANDLED),
                    None => Ok(Outcome::IGNORED),
                }
            }
            _ => Ok(Outcome::IGNORED),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagefx_core::{KeyCode, MemoryDom, SliderError};

    struct Page {
        dom: MemoryDom,
        left: NodeId,
        right: NodeId,
        dots: NodeId,
        slides: Vec<NodeId>,
    }

    fn page(n: usize) -> Page {
        let dom = MemoryDom::new();
        let slider = dom.append(dom.body(), ".slider");
        let slides = (0..n).map(|_| dom.append(slider, ".slide")).collect();
        let left = dom.append(slider, "button.slider__btn.slider__btn--left");
        let right = dom.append(slider, "button.slider__btn.slider__btn--right");
        let dots = dom.append(slider, ".dots");
        Page {
            dom,
            left,
            right,
            dots,
            slides,
        }
    }

    #[test]
    fn buttons_step_the_slider() {
        let p = page(3);
        let mut b = SliderBehavior::mount(p.dom.clone(), &SliderConfig::default()).unwrap();

        assert_eq!(b.handle_event(&Event::click(p.right)).unwrap(), Outcome::HANDLED);
        assert_eq!(b.slider().current_slide(), 1);
        b.handle_event(&Event::click(p.left)).unwrap();
        b.handle_event(&Event::click(p.left)).unwrap();
        assert_eq!(b.slider().current_slide(), 2);
        assert_eq!(
            p.dom.style(p.slides[0], "transform").as_deref(),
            Some("translateX(-200%)")
        );
    }

    #[test]
    fn clicks_inside_a_button_count() {
        let p = page(3);
        let icon = p.dom.append(p.right, "span");
        let mut b = SliderBehavior::mount(p.dom.clone(), &SliderConfig::default()).unwrap();
        b.handle_event(&Event::click(icon)).unwrap();
        assert_eq!(b.slider().current_slide(), 1);
    }

    #[test]
    fn arrow_keys_step_the_slider() {
        let p = page(4);
        let mut b = SliderBehavior::mount(p.dom, &SliderConfig::default()).unwrap();
        b.handle_event(&Event::key(KeyCode::ArrowLeft)).unwrap();
        assert_eq!(b.slider().current_slide(), 3);
        assert_eq!(
            b.handle_event(&Event::key(KeyCode::Escape)).unwrap(),
            Outcome::IGNORED
        );
    }

    #[test]
    fn dot_click_jumps() {
        let p = page(5);
        let mut b = SliderBehavior::mount(p.dom.clone(), &SliderConfig::default()).unwrap();
        let dot = p.dom.children(p.dots)[3];
        assert_eq!(b.handle_event(&Event::click(dot)).unwrap(), Outcome::HANDLED);
        assert_eq!(b.slider().current_slide(), 3);
        assert_eq!(b.handle_event(&Event::click(p.dots)).unwrap(), Outcome::IGNORED);
    }

    #[test]
    fn config_builders_pick_slides_and_keys() {
        let p = page(2);
        let extra = p.dom.append(p.dom.body(), ".panel");
        p.dom.add_class(p.slides[0], "panel");
        let config = SliderConfig::default()
            .slide(Selector::class("panel"))
            .keys(SliderKeys {
                prev: KeyCode::Char('h'),
                next: KeyCode::Char('l'),
            });
        let mut b = SliderBehavior::mount(p.dom.clone(), &config).unwrap();

        assert_eq!(b.slider().slide_count(), 2);
        assert_eq!(p.dom.children(p.dots).len(), 2);
        b.handle_event(&Event::key(KeyCode::Char('l'))).unwrap();
        assert_eq!(b.slider().current_slide(), 1);
        assert_eq!(
            p.dom.style(extra, "transform").as_deref(),
            Some("translateX(0%)")
        );
        assert_eq!(
            b.handle_event(&Event::key(KeyCode::ArrowRight)).unwrap(),
            Outcome::IGNORED
        );
    }

    #[test]
    fn page_without_slides_fails_to_mount() {
        let p = page(0);
        let err = SliderBehavior::mount(p.dom, &SliderConfig::default()).unwrap_err();
        assert!(matches!(err, PageError::Slider(SliderError::InvalidArgument(_))));
    }

    #[test]
    fn missing_dots_container_is_reported() {
        let dom = MemoryDom::new();
        dom.append(dom.body(), ".slide");
        dom.append(dom.body(), ".slider__btn--left");
        dom.append(dom.body(), ".slider__btn--right");
        let err = SliderBehavior::mount(dom, &SliderConfig::default()).unwrap_err();
        assert_eq!(err, PageError::missing(".dots"));
    }

    #[test]
    fn desynced_dots_report_error_and_keep_state() {
        let p = page(3);
        let mut b = SliderBehavior::mount(p.dom.clone(), &SliderConfig::default()).unwrap();
        let last = p.dom.children(p.dots)[2];
        p.dom.set_attribute(last, "data-slide", "x");

        let err = b.handle_event(&Event::key(KeyCode::ArrowLeft)).unwrap_err();
        assert!(matches!(err, PageError::Slider(SliderError::PreconditionFailed(_))));
        assert_eq!(b.slider().current_slide(), 0);

        // Moving forward still works.
        b.handle_event(&Event::key(KeyCode::ArrowRight)).unwrap();
        assert_eq!(b.slider().current_slide(), 1);
    }
}
