/// An element whose text content can be overwritten.
pub trait TextTarget {
    fn set_text(&self, text: &str);
}

/// Looks render targets up by id. A missing element is `None`, never an error.
///
/// Implementations must resolve on every call; the refresh cycle asks again on
/// each render attempt because the element can come and go with the view.
pub trait RenderSurface {
    fn find_target(&self, id: &str) -> Option<Box<dyn TextTarget>>;
}
