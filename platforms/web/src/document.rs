use swipe::{DocumentSink, Marker, MarkerStore, SwipeError, MARKER_CLASS, VALUE_ATTRIBUTE};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{window, Document, HtmlElement};

/// The live browser document, seen through the swipe document traits.
pub struct WebDocument {
    document: Document,
}

impl WebDocument {
    /// Binds to the document of the current window.
    pub fn current() -> Result<Self, SwipeError> {
        let document = window()
            .ok_or_else(|| SwipeError::Document("No window object available".to_string()))?
            .document()
            .ok_or_else(|| SwipeError::Document("No document available".to_string()))?;

        Ok(Self { document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn body(&self) -> Result<HtmlElement, SwipeError> {
        self.document
            .body()
            .ok_or_else(|| SwipeError::Document("Document has no body".to_string()))
    }
}

fn js_error(context: &str, error: JsValue) -> SwipeError {
    SwipeError::Document(format!("{}: {:?}", context, error))
}

impl DocumentSink for WebDocument {
    fn append_marker(&mut self, marker: &Marker) -> Result<(), SwipeError> {
        let body = self.body()?;

        let element = self
            .document
            .create_element(&marker.tag)
            .map_err(|e| js_error("Failed to create marker element", e))?;
        element.set_class_name(&marker.class);
        element
            .set_attribute(VALUE_ATTRIBUTE, marker.value.as_str())
            .map_err(|e| js_error("Failed to set marker value", e))?;

        let element: HtmlElement = element
            .dyn_into()
            .map_err(|e| js_error("Marker is not an HTML element", e.into()))?;
        let style = element.style();
        for (property, value) in &marker.style {
            style
                .set_property(property, value)
                .map_err(|e| js_error("Failed to set marker style", e))?;
        }

        body.append_child(&element)
            .map_err(|e| js_error("Failed to append marker", e))?;

        Ok(())
    }
}

impl MarkerStore for WebDocument {
    fn marker_values(&self) -> Result<Vec<String>, SwipeError> {
        let markers = self.document.get_elements_by_class_name(MARKER_CLASS);

        Ok((0..markers.length())
            .filter_map(|index| markers.item(index))
            .map(|element| element.get_attribute(VALUE_ATTRIBUTE).unwrap_or_default())
            .collect())
    }

    fn remove_markers(&mut self) -> Result<usize, SwipeError> {
        // The collection is live: removing the head shifts the rest down.
        let markers = self.document.get_elements_by_class_name(MARKER_CLASS);
        let mut removed = 0;
        while let Some(element) = markers.item(0) {
            element.remove();
            removed += 1;
        }

        Ok(removed)
    }
}
