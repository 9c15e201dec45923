//! Pagination helper for list-returning routes.

use actix_web::HttpRequest;

/// Slice `results` into the requested 1-indexed page and compute the
/// next-page URL.
///
/// Out-of-range pages simply yield fewer or zero elements, never an error.
/// The next URL carries `extra_params` first, then the incremented `page`
/// and the same `per_page`. Parameter values are not URL-encoded; callers
/// only pass values that were already accepted as query parameters.
pub fn paginate<T: Clone>(
    results: &[T],
    page: usize,
    per_page: usize,
    base_url: &str,
    extra_params: &[(&str, String)],
) -> (Vec<T>, Option<String>) {
    let start = (page - 1) * per_page;
    let end = start + per_page;

    let page_slice: Vec<T> = results.iter().skip(start).take(per_page).cloned().collect();

    let next_url = (end < results.len()).then(|| {
        let mut params: Vec<String> = extra_params
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        params.push(format!("page={}", page + 1));
        params.push(format!("per_page={per_page}"));
        format!("{base_url}?{}", params.join("&"))
    });

    (page_slice, next_url)
}

/// Reconstruct the request URL without its query string, for use as the
/// base of pagination links.
pub fn base_url(req: &HttpRequest) -> String {
    let info = req.connection_info();
    format!("{}://{}{}", info.scheme(), info.host(), req.path())
}
