/// Executed with the target element as `arguments[0]`. Returns the record
/// that deserializes into `ViewportInfo`.
///
/// `screenLeft`/`screenTop` cover browsers without `screenX`/`screenY`;
/// a missing `devicePixelRatio` means no scaling.
pub const VIEWPORT_INFO_JS: &str = r#"
const el = arguments[0];
const rect = el.getBoundingClientRect();
return {
    rect: {
        left: rect.left,
        top: rect.top,
        width: rect.width,
        height: rect.height
    },
    screenX: window.screenX || window.screenLeft || 0,
    screenY: window.screenY || window.screenTop || 0,
    outerWidth: window.outerWidth,
    outerHeight: window.outerHeight,
    innerWidth: window.innerWidth,
    innerHeight: window.innerHeight,
    devicePixelRatio: window.devicePixelRatio || 1
};
"#;
