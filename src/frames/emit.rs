//! Header and build-fragment rendering for frame tables

use std::path::PathBuf;

use crate::symbol::{c_identifier, linker_stem};

/// Symbol names for one embedded frame file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSymbol {
    /// Base file name as discovered
    pub file_name: String,
    /// C identifier base (`<ident>_start`, `<ident>_end`)
    pub ident: String,
    /// Linker stem (`_binary_<stem>_start`, `_binary_<stem>_end`)
    pub stem: String,
}

impl FrameSymbol {
    /// Derive both symbol forms from a frame's base file name
    pub fn new(file_name: &str) -> Self {
        FrameSymbol {
            file_name: file_name.to_string(),
            ident: c_identifier(file_name),
            stem: linker_stem(file_name),
        }
    }

    /// C name of the first byte of the embedded file
    pub fn start(&self) -> String {
        format!("{}_start", self.ident)
    }

    /// C name one past the last byte of the embedded file
    pub fn end(&self) -> String {
        format!("{}_end", self.ident)
    }
}

/// Layout of one row in the `g_frames` table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowStyle {
    /// `    a_start, a_end,`
    #[default]
    Flat,
    /// `    {a_start, a_end,},`
    Braced,
}

/// Settings for the ESP-IDF component registration fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildFragment {
    /// File the fragment is written to
    pub output: PathBuf,
    /// Directories passed as `SRC_DIRS`
    pub src_dirs: Vec<String>,
    /// Directories passed as `INCLUDE_DIRS`
    pub include_dirs: Vec<String>,
    /// Prepended to each frame file name in `EMBED_TXTFILES`
    pub resource_prefix: String,
}

impl Default for BuildFragment {
    fn default() -> Self {
        BuildFragment {
            output: PathBuf::from("../../main/CMakeLists.txt"),
            src_dirs: vec![".".to_string(), "../media/audio/".to_string()],
            include_dirs: vec![".".to_string(), "../media/video/".to_string()],
            resource_prefix: "../media/video/frames/".to_string(),
        }
    }
}

/// Render the header: extern declarations followed by the symbol table
pub fn render_header(frames: &[FrameSymbol], table_name: &str, style: RowStyle) -> String {
    let mut out = String::new();

    for frame in frames {
        out.push_str(&format!(
            "extern uint8_t {}[] asm(\"_binary_{}_start\");\n",
            frame.start(),
            frame.stem
        ));
        out.push_str(&format!(
            "extern uint8_t {}[]   asm(\"_binary_{}_end\");\n",
            frame.end(),
            frame.stem
        ));
    }

    out.push_str(&format!("\nstatic uint8_t* {}[][2]={{\n", table_name));
    for frame in frames {
        let row = match style {
            RowStyle::Flat => format!("    {}, {},\n", frame.start(), frame.end()),
            RowStyle::Braced => format!("    {{{}, {},}},\n", frame.start(), frame.end()),
        };
        out.push_str(&row);
    }
    out.push_str("};\n\n");

    out
}

/// Render the build-descriptor fragment listing every frame as an embedded file
pub fn render_build_fragment(frames: &[FrameSymbol], build: &BuildFragment) -> String {
    let quote_all = |dirs: &[String]| {
        dirs.iter()
            .map(|d| format!("\"{}\"", d))
            .collect::<Vec<_>>()
            .join(" ")
    };

    // 21-space continuation indent, trailing space before each newline
    let mut out = format!(
        "idf_component_register(SRC_DIRS {} \n\
         \x20                    INCLUDE_DIRS {} \n\
         \x20                    EMBED_TXTFILES \n",
        quote_all(&build.src_dirs),
        quote_all(&build.include_dirs)
    );
    for frame in frames {
        out.push_str(&format!("\"{}{}\"\n", build.resource_prefix, frame.file_name));
    }
    out.push_str(")\n\n");

    out
}
