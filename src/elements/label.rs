#![warn(missing_docs)]
use serde::{Deserialize, Serialize};

use super::{ElementType, Optical};
use crate::{
    error::{LbError, LbResult},
    geometry::{Line2D, Vector2D},
    optical_surface::Intersection,
    properties::Properties,
};

/// A text label.
///
/// Labels are purely cosmetic and never interact with rays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    text: String,
}
impl Default for Label {
    fn default() -> Self {
        Self {
            text: "Label".into(),
        }
    }
}
impl Label {
    /// Creates a new [`Label`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the text is empty.
    pub fn new(text: &str) -> LbResult<Self> {
        if text.is_empty() {
            return Err(LbError::Properties("label: text must not be empty".into()));
        }
        Ok(Self { text: text.into() })
    }
    /// Returns the text of this [`Label`].
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}
impl Optical for Label {
    fn element_type(&self) -> ElementType {
        ElementType::Label
    }
    fn intersect(&self, _ray: &Line2D) -> Option<Intersection> {
        None
    }
    fn outline(&self) -> Vec<Vector2D> {
        vec![Vector2D::zero()]
    }
    fn properties(&self) -> LbResult<Properties> {
        let mut props = Properties::default();
        props.create("text", "label text", self.text.as_str().into())?;
        Ok(props)
    }
    fn from_properties(props: &Properties) -> LbResult<Self> {
        Self::new(props.get_string("text")?)
    }
}
