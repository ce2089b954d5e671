//! Response body templates.

use crate::functions::identity::Identity;

const RULE: &str = "-----------------------------------";

/// Body of a successful key lookup.
pub fn render(region: &str, identity: &Identity, keys: &str) -> String {
    format!(
        "hello from openedge running in {region}\n\
         {RULE}\n\
         github public ssh keys for\n\
         {identity}\n\
         {RULE}\n\
         \t\n\
         {keys}\n\
         \t\t"
    )
}

/// Body of the fixed-identity greeting.
pub fn render_hello(region: &str, keys: &str) -> String {
    format!("hello from openedge running in {region}\n{keys}")
}

pub fn render_goodbye(region: &str) -> String {
    format!("goodbye from deno-edge running in {region}")
}
