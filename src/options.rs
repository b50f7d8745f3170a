use backdrop_core::StageConfig;
use wasm_bindgen::JsValue;

/// Convert the JS options object for `kind` into a validated config.
/// `undefined` and `null` mean "all defaults".
pub fn stage_config(kind: &str, options: &JsValue) -> anyhow::Result<StageConfig> {
    let json = if options.is_undefined() || options.is_null() {
        "{}".to_string()
    } else {
        js_sys::JSON::stringify(options)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .as_string()
            .ok_or_else(|| anyhow::anyhow!("options must be a plain object"))?
    };
    Ok(StageConfig::from_json(kind, &json)?)
}
