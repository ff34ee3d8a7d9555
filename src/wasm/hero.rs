use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement};

use crate::page::{font_classes, HeroStyle};
use crate::settings::TypographySettings;

pub const HERO_IDS: [&str; 2] = ["hero-title", "hero-tagline"];

/// The hero heading and tagline the typography applies to.
pub struct Hero {
    targets: Vec<HtmlElement>,
}

impl Hero {
    /// Missing targets are skipped.
    pub fn find(document: &Document) -> Self {
        let targets = HERO_IDS
            .iter()
            .filter_map(|id| document.get_element_by_id(id))
            .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
            .collect();
        Self { targets }
    }

    pub fn apply(&self, settings: &TypographySettings) -> Result<(), JsValue> {
        let style = HeroStyle::from(settings);
        for el in &self.targets {
            let classes = el.class_list();
            for class in font_classes() {
                classes.remove_1(class)?;
            }
            classes.add_1(&style.font_class)?;
            let css = el.style();
            for (property, value) in &style.declarations {
                css.set_property(property, value)?;
            }
        }
        Ok(())
    }
}
