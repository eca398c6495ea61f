//! Completion of object-storage hostnames that were cut short.
//!
//! Some upstream records carry bucket URLs truncated right after `.s3.a`
//! (`https://bucket.s3.a/path`). The bucket part and everything after the
//! host survive, so the host can be rebuilt as `bucket.s3.amazonaws.com`.

use url::Url;

const TRUNCATED_SUFFIX: &str = ".s3.a";
const S3_SUFFIX: &str = ".s3.amazonaws.com";

/// Rebuilds a truncated `*.s3.a` host as `*.s3.amazonaws.com`.
///
/// Works on the parsed host, so ports, userinfo and any spelling the URL
/// parser accepts are handled the same way. URLs with a complete or regional
/// S3 host, or with a non-HTTP(S) scheme, come back untouched.
///
/// # Examples
///
/// ```
/// use image_url_resolver::utils::s3_host::complete_s3_host;
/// use url::Url;
///
/// let url = Url::parse("https://mybucket.s3.a/path/to/file.jpg").unwrap();
/// assert_eq!(
///     complete_s3_host(url).as_str(),
///     "https://mybucket.s3.amazonaws.com/path/to/file.jpg"
/// );
/// ```
pub fn complete_s3_host(mut url: Url) -> Url {
    if !matches!(url.scheme(), "http" | "https") {
        return url;
    }

    let Some(bucket) = url
        .host_str()
        .and_then(|host| host.strip_suffix(TRUNCATED_SUFFIX))
        .filter(|bucket| !bucket.is_empty())
    else {
        return url;
    };

    let host = format!("{bucket}{S3_SUFFIX}");
    if let Err(e) = url.set_host(Some(host.as_str())) {
        tracing::debug!(host = %host, error = %e, "Could not complete S3 host");
    }

    url
}
