//! Static asset manifest
//!
//! The page shells and bundle files an offline cache should hold. The cache
//! worker itself lives outside this crate; it only needs this list and the
//! cache name, which changes whenever the list does.

/// Versioned cache name
pub const CACHE_NAME: &str = "pocket-arcade-v1";

/// Files served as-is, relative to the site root
pub const STATIC_ASSETS: &[&str] = &[
    "./",
    "./index.html",
    "./pong.html",
    "./jumper.html",
    "./snake.html",
    "./style.css",
    "./pocket_arcade.js",
    "./pocket_arcade_bg.wasm",
    "./manifest.webmanifest",
    "./service-worker.js",
];

/// Page served when a navigation misses the cache while offline
pub const OFFLINE_FALLBACK: &str = "./index.html";

/// Whether `path` is in the manifest. Accepts paths with or without the
/// leading `./`.
pub fn is_static_asset(path: &str) -> bool {
    let path = path.trim_start_matches("./").trim_start_matches('/');
    STATIC_ASSETS
        .iter()
        .any(|asset| asset.trim_start_matches("./") == path)
}
