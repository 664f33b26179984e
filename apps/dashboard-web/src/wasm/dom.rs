use super::*;

    pub(super) struct BrowserLocation;

    impl ViewLocation for BrowserLocation {
        fn current_path(&self) -> String {
            current_pathname()
        }
    }

    /// Resolves elements through `document.getElementById` on every call.
    pub(super) struct DomSurface;

    impl RenderSurface for DomSurface {
        fn find_target(&self, id: &str) -> Option<Box<dyn TextTarget>> {
            let document = web_sys::window()?.document()?;
            let element = document.get_element_by_id(id)?;
            Some(Box::new(DomTextTarget { element }))
        }
    }

    struct DomTextTarget {
        element: web_sys::Element,
    }

    impl TextTarget for DomTextTarget {
        fn set_text(&self, text: &str) {
            self.element.set_text_content(Some(text));
        }
    }
