use web_sys::Document;

use crate::error::SiteError;

const STYLE_ID: &str = "site-enhance-styles";

const ENHANCEMENT_CSS: &str = r#"
    .notification {
        position: fixed;
        top: 100px;
        right: 20px;
        background: white;
        padding: 1rem 1.5rem;
        border-radius: 10px;
        box-shadow: 0 5px 20px rgba(0,0,0,0.15);
        display: flex;
        align-items: center;
        gap: 1rem;
        z-index: 10000;
        animation: slideInRight 0.3s ease-out;
        max-width: 400px;
    }
    .notification-success { border-left: 4px solid #4caf50; }
    .notification-error { border-left: 4px solid #f44336; }
    .notification-info { border-left: 4px solid #2196f3; }
    .notification i:first-child { font-size: 1.5rem; }
    .notification-success i:first-child { color: #4caf50; }
    .notification-error i:first-child { color: #f44336; }
    .notification-info i:first-child { color: #2196f3; }
    .notification-close {
        background: none;
        border: none;
        cursor: pointer;
        padding: 0.5rem;
        color: #666;
        transition: color 0.3s;
    }
    .notification-close:hover { color: #333; }
    .notification.fade-out { animation: slideOutRight 0.3s ease-out; }
    .back-to-top {
        position: fixed;
        bottom: 30px;
        right: 30px;
        width: 50px;
        height: 50px;
        background: linear-gradient(135deg, #0056b3 0%, #00bcd4 100%);
        color: white;
        border: none;
        border-radius: 50%;
        cursor: pointer;
        display: flex;
        align-items: center;
        justify-content: center;
        font-size: 1.2rem;
        box-shadow: 0 5px 15px rgba(0,0,0,0.2);
        opacity: 0;
        visibility: hidden;
        transition: all 0.3s;
        z-index: 999;
    }
    .back-to-top.visible {
        opacity: 1;
        visibility: visible;
    }
    .back-to-top:hover {
        transform: translateY(-5px);
        box-shadow: 0 8px 20px rgba(0,0,0,0.3);
    }
    @keyframes slideInRight {
        from { transform: translateX(400px); opacity: 0; }
        to { transform: translateX(0); opacity: 1; }
    }
    @keyframes slideOutRight {
        from { transform: translateX(0); opacity: 1; }
        to { transform: translateX(400px); opacity: 0; }
    }
    @media (max-width: 768px) {
        .notification {
            left: 20px;
            right: 20px;
            max-width: calc(100% - 40px);
        }
    }
"#;

/// Adds the toast and back-to-top rules to `<head>`. Safe to call twice.
pub fn inject(document: &Document) -> Result<(), SiteError> {
    if document.get_element_by_id(STYLE_ID).is_some() {
        return Ok(());
    }
    let Some(head) = document.head() else {
        log::warn!("document has no <head>; enhancement styles skipped");
        return Ok(());
    };
    let style = document.create_element("style")?;
    style.set_id(STYLE_ID);
    style.set_text_content(Some(ENHANCEMENT_CSS));
    head.append_child(&style)?;
    Ok(())
}
