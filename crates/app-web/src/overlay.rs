use web_sys as web;

use crate::constants::CONTACT_MODAL_ID;

#[inline]
pub fn show(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(CONTACT_MODAL_ID) {
        let _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(CONTACT_MODAL_ID) {
        let _ = el.set_attribute("style", "display:none");
    }
}

#[inline]
pub fn is_hidden(document: &web::Document) -> bool {
    document
        .get_element_by_id(CONTACT_MODAL_ID)
        .and_then(|el| el.get_attribute("style"))
        .map(|s| s.contains("display:none"))
        .unwrap_or(true)
}
