//! Category listing

use colored::*;
use jobwatch_core::Category;

pub fn list() {
    println!("{}", "Categories:".bold());
    for category in Category::ALL {
        println!("  {:<24} {}", category.key().cyan(), category.display_name());
    }
}
