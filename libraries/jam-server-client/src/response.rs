//! Status mapping and envelope decoding shared by the sub-clients.

use crate::error::{Result, ServerClientError};
use crate::types::{Envelope, ListingData};
use jam_core::{Page, UserId};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

/// Append path segments to the API root.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| ServerClientError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Append `pageNumber`/`pageSize` paging to `url`.
pub(crate) fn paged(url: &mut Url, page_number: u32, page_size: u32) {
    url.query_pairs_mut()
        .append_pair("pageNumber", &page_number.to_string())
        .append_pair("pageSize", &page_size.to_string());
}

/// Endpoint of a per-user listing such as `/TrackPlay/byUser?userId=..`.
pub(crate) fn user_listing(
    base: &Url,
    segments: &[&str],
    user_id: &UserId,
    page_number: u32,
    page_size: u32,
) -> Result<Url> {
    let mut url = endpoint(base, segments)?;
    url.query_pairs_mut().append_pair("userId", user_id.as_str());
    paged(&mut url, page_number, page_size);
    Ok(url)
}

/// GET a listing whose page sits under `data.tracks`.
pub(crate) async fn fetch_page<T: DeserializeOwned>(
    http: &Client,
    url: Url,
    token: Option<&str>,
    what: &str,
) -> Result<Page<T>> {
    let request = authorize(http.get(url.clone()), token);
    let response = send(request, &url).await?;
    let payload: ListingData<T> = data(response, what).await?;
    Ok(payload.tracks)
}

/// Attach the bearer token when signed in.
pub(crate) fn authorize(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

/// Send and map non-2xx statuses to errors.
pub(crate) async fn send(request: RequestBuilder, url: &Url) -> Result<Response> {
    let response = request.send().await.map_err(ServerClientError::from_send)?;
    let status = response.status();

    if status.is_success() {
        Ok(response)
    } else if status == StatusCode::UNAUTHORIZED {
        Err(ServerClientError::AuthRequired)
    } else if status == StatusCode::NOT_FOUND {
        Err(ServerClientError::NotFound(url.path().to_string()))
    } else {
        let error_text = response.text().await.unwrap_or_default();
        Err(ServerClientError::ServerError {
            status: status.as_u16(),
            message: error_text,
        })
    }
}

/// Decode the `data` payload of a successful response.
pub(crate) async fn data<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    let envelope: Envelope<T> = response.json().await.map_err(|e| {
        ServerClientError::ParseError(format!("Failed to parse {} response: {}", what, e))
    })?;
    Ok(envelope.data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_and_escapes_segments() {
        let base = Url::parse("http://localhost:5000/api/v1").unwrap();
        let url = endpoint(&base, &["Track", "byuser", "a b"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/v1/Track/byuser/a%20b");
    }

    #[test]
    fn user_listing_carries_user_and_paging() {
        let base = Url::parse("http://localhost:5000/api/v1").unwrap();
        let url = user_listing(&base, &["TrackLike", "byUser"], &UserId::new("u-1"), 1, 3).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/api/v1/TrackLike/byUser?userId=u-1&pageNumber=1&pageSize=3"
        );
    }

    #[test]
    fn endpoint_handles_trailing_slash() {
        let base = Url::parse("https://jam.example.com/").unwrap();
        let url = endpoint(&base, &["TrackPlay"]).unwrap();
        assert_eq!(url.as_str(), "https://jam.example.com/TrackPlay");
    }
}
