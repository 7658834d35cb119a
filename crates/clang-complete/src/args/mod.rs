use std::fmt;

/// Language variant selected for a translation unit.
///
/// The dialect decides the `-x` language flag and the shape of the `-std=`
/// flag; everything else about argument handling is dialect-independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    C,
    #[default]
    Cpp,
    ObjC,
    ObjCpp,
}

impl Dialect {
    pub fn from_setting_value(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "c" => Self::C,
            "c++" | "cpp" => Self::Cpp,
            "objc" | "objective-c" => Self::ObjC,
            "objc++" | "objcpp" | "objective-c++" => Self::ObjCpp,
            _ => Self::Cpp,
        }
    }

    pub fn as_setting_value(self) -> &'static str {
        match self {
            Self::C => "c",
            Self::Cpp => "c++",
            Self::ObjC => "objective-c",
            Self::ObjCpp => "objective-c++",
        }
    }

    fn language_flag(self) -> &'static str {
        match self {
            Self::C => "-xc",
            Self::Cpp => "-xc++",
            Self::ObjC => "-xobjective-c",
            Self::ObjCpp => "-xobjective-c++",
        }
    }

    fn standard_flag(self, version: u32) -> String {
        match self {
            Self::C | Self::ObjC => format!("-std=c{version}"),
            Self::Cpp | Self::ObjCpp => format!("-std=c++{version}"),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_setting_value())
    }
}

/// Ordered, duplicate-free set of compiler flags for one completion session.
///
/// Insertion order is preserved so that flag precedence stays predictable;
/// inserting a flag that is already present is a no-op reported through the
/// `bool` return of [`ArgumentManager::add_arg`]. This component cannot fail.
#[derive(Debug, Clone)]
pub struct ArgumentManager {
    args: Vec<String>,
    dialect: Dialect,
}

impl ArgumentManager {
    /// Seeds the baseline flags: syntax-check only, the base system include
    /// directory, and the dialect selection flag.
    pub fn new(dialect: Dialect) -> Self {
        let mut manager = Self {
            args: Vec::new(),
            dialect,
        };
        manager.add_arg("-fsyntax-only");
        manager.add_include_path(&base_include_dir());
        manager.add_arg(dialect.language_flag());
        manager
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Append a flag unless it is already present. Returns whether the flag
    /// was newly added.
    pub fn add_arg(&mut self, arg: impl Into<String>) -> bool {
        let arg = arg.into();
        if self.args.contains(&arg) {
            return false;
        }
        self.args.push(arg);
        true
    }

    pub fn add_args<I, S>(&mut self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for arg in args {
            self.add_arg(arg);
        }
    }

    pub fn add_include_path(&mut self, path: &str) -> bool {
        self.add_arg(format!("-I{path}"))
    }

    pub fn add_include_paths<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for path in paths {
            self.add_include_path(path.as_ref());
        }
    }

    pub fn add_definition(&mut self, definition: &str) -> bool {
        self.add_arg(format!("-D{definition}"))
    }

    pub fn add_definitions<I, S>(&mut self, definitions: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for definition in definitions {
            self.add_definition(definition.as_ref());
        }
    }

    /// Set the language standard, replacing any previously selected one in
    /// place so the flag keeps its original position.
    pub fn set_standard(&mut self, version: u32) {
        let flag = self.dialect.standard_flag(version);
        match self.args.iter().position(|arg| arg.starts_with("-std=")) {
            Some(index) => self.args[index] = flag,
            None => {
                self.args.push(flag);
            },
        }
    }

    /// Materialize the flag list for one frontend invocation.
    pub fn prepare_args(&self) -> Vec<String> {
        self.args.clone()
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl Default for ArgumentManager {
    fn default() -> Self {
        Self::new(Dialect::default())
    }
}

fn base_include_dir() -> String {
    std::env::var("CLANG_INCLUDE_DIR").unwrap_or_else(|_| ".".to_string())
}

#[cfg(test)]
#[path = "../../tests/src/args/argument_manager_tests.rs"]
mod tests;
