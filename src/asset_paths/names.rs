/// Produce the directory-qualified source path the bundler resolves against the source context.
///
/// The generated path always uses forward slashes and a leading `./`, regardless of how the
/// pages directory was spelled in the configuration.
pub fn make_entry_source_path(pages_dir: &str, file_name: &str) -> String {
  let dir = pages_dir
    .replace('\\', "/")
    .trim_start_matches("./")
    .trim_matches('/')
    .to_string();

  if dir.is_empty() {
    format!("./{file_name}")
  } else {
    format!("./{dir}/{file_name}")
  }
}

/// Strip one of the recognized extensions from a filename, yielding the page name.
///
/// Returns `None` when the file carries none of the extensions or nothing is left once the
/// extension is removed.
pub fn strip_recognized_extension<'a, S: AsRef<str>>(
  file_name: &'a str,
  extensions: &[S],
) -> Option<&'a str> {
  extensions.iter().find_map(|extension| {
    file_name
      .strip_suffix(extension.as_ref())
      .and_then(|rest| rest.strip_suffix('.'))
      .filter(|page| !page.is_empty())
  })
}

/// Dotfiles (editor swap files, `.DS_Store`, `.gitkeep`) never describe a page.
pub fn is_hidden_file(file_name: &str) -> bool {
  file_name.starts_with('.')
}
