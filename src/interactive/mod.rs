//
//  bcr-api
//  interactive/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use std::io::IsTerminal;

mod prompt;
mod selector;

pub use prompt::*;
pub use selector::*;

/// Whether both stdin and stdout are attached to a terminal.
pub fn is_interactive() -> bool {
    console::user_attended() && std::io::stdin().is_terminal()
}
