//! `gloo-net` transport shared by the session API and the MedAI backend.
//!
//! Every response body is read in full and classified with
//! [`protocol::codec::check_status`]. On the server (SSR) the helpers report
//! a network error, since these calls only make sense in the browser.

#![allow(clippy::unused_async)]

use protocol::ApiError;
use protocol::codec::FormField;
use serde::Serialize;

#[cfg(not(feature = "hydrate"))]
fn unavailable() -> ApiError {
    ApiError::Network("not available on server".to_owned())
}

#[cfg(feature = "hydrate")]
fn transport(err: gloo_net::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

#[cfg(feature = "hydrate")]
fn js_error(err: wasm_bindgen::JsValue) -> ApiError {
    ApiError::Network(format!("browser error: {err:?}"))
}

#[cfg(feature = "hydrate")]
async fn read_body(resp: gloo_net::http::Response) -> Result<String, ApiError> {
    let status = resp.status();
    let body = resp.text().await.map_err(transport)?;
    protocol::codec::check_status(status, &body)?;
    Ok(body)
}

pub(crate) async fn get(url: &str) -> Result<String, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(url).send().await.map_err(transport)?;
        read_body(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = url;
        Err(unavailable())
    }
}

pub(crate) async fn post_empty(url: &str) -> Result<String, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(url).send().await.map_err(transport)?;
        read_body(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = url;
        Err(unavailable())
    }
}

pub(crate) async fn post_json<T: Serialize>(url: &str, body: &T) -> Result<String, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(url)
            .json(body)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        read_body(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (url, body);
        Err(unavailable())
    }
}

pub(crate) async fn post_form(url: &str, fields: &[FormField]) -> Result<String, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let form = form_data(fields)?;
        let resp = gloo_net::http::Request::post(url)
            .body(form)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        read_body(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (url, fields);
        Err(unavailable())
    }
}

/// Build a browser `FormData`; the browser sets the multipart boundary.
#[cfg(feature = "hydrate")]
fn form_data(fields: &[FormField]) -> Result<web_sys::FormData, ApiError> {
    use protocol::codec::FormValue;

    let form = web_sys::FormData::new().map_err(js_error)?;
    for field in fields {
        match &field.value {
            FormValue::Text(text) => form.append_with_str(field.name, text).map_err(js_error)?,
            FormValue::File { file_name, content_type, bytes } => {
                let array = js_sys::Uint8Array::from(&bytes[..]);
                let parts = js_sys::Array::of1(&array);
                let options = web_sys::BlobPropertyBag::new();
                options.set_type(content_type);
                let blob =
                    web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_error)?;
                form.append_with_blob_and_filename(field.name, &blob, file_name).map_err(js_error)?;
            }
        }
    }
    Ok(form)
}
