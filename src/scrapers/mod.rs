//! News site scrapers.
//!
//! A scraper works in phases against a [`Browser`](crate::browser::Browser):
//!
//! 1. **Search**: open the site, submit the phrase and wait for results to
//!    render
//! 2. **Narrow** (optional): click a category link and wait again
//! 3. **Collect**: read the headline, date and description lists off the
//!    rendered page
//!
//! # Supported Sources
//!
//! | Source | Module | Method |
//! |--------|--------|--------|
//! | AP News | [`apnews`] | Search overlay + category links |

pub mod apnews;
