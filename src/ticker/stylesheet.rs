use crate::dom::node::NodeId;
use crate::foundation::error::TickerResult;
use crate::page::host::Page;

/// The engine's `<style>` element in `<head>`, holding generated keyframes.
#[derive(Debug)]
pub struct GeneratedStylesheet {
    element: Option<NodeId>,
}

impl GeneratedStylesheet {
    /// Reuse the element with `id` if the page already has one, else create it.
    pub fn attach(page: &mut Page, id: &str) -> TickerResult<Self> {
        if let Some(existing) = page.document().get_element_by_id(id)
            && page.document().tag(existing) == Some("style")
        {
            tracing::debug!(id, "reusing existing stylesheet element");
            return Ok(Self {
                element: Some(existing),
            });
        }
        let doc = page.document_mut();
        let style = doc.create_element("style");
        doc.set_attr(style, "id", id)?;
        let head = doc.head();
        doc.append_child(head, style)?;
        Ok(Self {
            element: Some(style),
        })
    }

    pub fn element(&self) -> Option<NodeId> {
        self.element
    }

    pub fn text(&self, page: &Page) -> String {
        self.element
            .map(|el| page.document().text_content(el))
            .unwrap_or_default()
    }

    pub fn clear(&self, page: &mut Page) -> TickerResult<()> {
        self.write(page, "")
    }

    /// Replace the whole sheet text in one mutation.
    pub fn write(&self, page: &mut Page, css: &str) -> TickerResult<()> {
        match self.element {
            Some(el) if page.document().contains(el) => page.document_mut().set_text_content(el, css),
            _ => Ok(()),
        }
    }

    /// Detach and free the element. Safe to call more than once.
    pub fn remove(&mut self, page: &mut Page) -> TickerResult<()> {
        if let Some(el) = self.element.take()
            && page.document().contains(el)
        {
            page.document_mut().destroy(el)?;
        }
        Ok(())
    }
}
