use std::path::PathBuf;

/// JavaScript/TypeScript language variant, selected by file extension
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JsVariant {
    JavaScript,
    Jsx,
    TypeScript,
    Tsx,
}

impl JsVariant {
    pub fn from_extension(ext: &str) -> Option<Self> {
        static EXTENSION_MAP: &[(&[&str], JsVariant)] = &[
            (&["js", "mjs", "cjs"], JsVariant::JavaScript),
            (&["jsx"], JsVariant::Jsx),
            (&["ts", "mts", "cts"], JsVariant::TypeScript),
            (&["tsx"], JsVariant::Tsx),
        ];

        EXTENSION_MAP
            .iter()
            .find(|(exts, _)| exts.contains(&ext))
            .map(|(_, variant)| *variant)
    }
}

/// A parsed TypeScript/JavaScript source file
#[derive(Clone, Debug)]
pub struct TsAst {
    pub tree: tree_sitter::Tree,
    pub source: String,
    pub path: PathBuf,
    pub variant: JsVariant,
}

impl TsAst {
    pub fn root(&self) -> tree_sitter::Node<'_> {
        self.tree.root_node()
    }
}
