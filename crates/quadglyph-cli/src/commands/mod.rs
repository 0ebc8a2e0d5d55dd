//! One module per subcommand

pub mod atlas;
pub mod info;
pub mod layout;

use anyhow::Context;
use quadglyph::fontdb::Font;

use crate::cli::FontArgs;

pub(crate) fn load_font(args: &FontArgs) -> anyhow::Result<Font> {
    log::debug!(
        "Loading font from {} (face {})",
        args.font_file.display(),
        args.face_index
    );
    Font::from_file_index(&args.font_file, args.face_index)
        .with_context(|| format!("loading {}", args.font_file.display()))
}
