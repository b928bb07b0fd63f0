//! Category scaffolding: derives the initial virtual file set from a
//! descriptor. Pure function of descriptor fields; identical input yields
//! byte-identical output, so it is unit-testable offline.

use rustc_hash::FxHashSet;

use crate::kernel::services::ports::catalog::{Category, ChallengeDescriptor};
use crate::kernel::state::{FileMap, Scaffold};

const INDEX_HTML: &str = "index.html";
const MAIN_TS: &str = "src/main.ts";

pub fn generate(descriptor: &ChallengeDescriptor) -> Scaffold {
    let mut files = FileMap::default();

    files.insert(INDEX_HTML.to_string(), index_html(descriptor));
    files.insert(MAIN_TS.to_string(), main_ts(descriptor));
    files.insert(
        descriptor.workspace.path.clone(),
        workspace_component(descriptor),
    );

    if let Some((path, content)) = category_extra(descriptor) {
        // The workspace file wins on collision; extras never overwrite it.
        files.entry(path).or_insert(content);
    }

    let mut read_only = FxHashSet::default();
    read_only.insert(INDEX_HTML.to_string());
    read_only.insert(MAIN_TS.to_string());

    Scaffold {
        files,
        default_file: descriptor.workspace.path.clone(),
        read_only,
        language: "typescript".to_string(),
    }
}

fn banner(descriptor: &ChallengeDescriptor) -> String {
    let mut lines = vec![format!("// {}", descriptor.title)];
    if !descriptor.requirements.is_empty() {
        lines.push("//".to_string());
        lines.push("// Requirements:".to_string());
        for requirement in &descriptor.requirements {
            lines.push(format!("// - {}", requirement));
        }
    }
    lines.push(String::new());
    lines.join("\n")
}

fn index_html(descriptor: &ChallengeDescriptor) -> String {
    format!(
        "<!doctype html>\n<html>\n  <head>\n    <title>{}</title>\n  </head>\n  <body>\n    <div id=\"app\"></div>\n    <script type=\"module\" src=\"/src/main.ts\"></script>\n  </body>\n</html>\n",
        descriptor.title
    )
}

fn module_specifier(path: &str) -> String {
    let trimmed = path.strip_prefix("src/").unwrap_or(path);
    let trimmed = trimmed.strip_suffix(".ts").unwrap_or(trimmed);
    format!("./{}", trimmed)
}

fn main_ts(descriptor: &ChallengeDescriptor) -> String {
    format!(
        "import {{ {} }} from '{}';\n\nconst root = document.querySelector('#app');\nif (root) {{\n  new {}().mount(root);\n}}\n",
        descriptor.workspace.name,
        module_specifier(&descriptor.workspace.path),
        descriptor.workspace.name
    )
}

fn workspace_component(descriptor: &ChallengeDescriptor) -> String {
    let body = match descriptor.category {
        Category::Forms => format!(
            "import {{ required }} from './validators';\n\nexport class {} {{\n  errors: string[] = [];\n\n  mount(root: Element) {{\n    root.innerHTML = '<form></form>';\n  }}\n\n  submit(value: string) {{\n    this.errors = required(value) ? [] : ['required'];\n  }}\n}}\n",
            descriptor.workspace.name
        ),
        Category::DataFetching => format!(
            "import {{ fetchJson }} from './api';\n\nexport class {} {{\n  items: unknown[] = [];\n  loading = false;\n\n  mount(root: Element) {{\n    root.innerHTML = '<ul></ul>';\n  }}\n\n  async refresh(url: string) {{\n    this.loading = true;\n    try {{\n      this.items = await fetchJson(url);\n    }} finally {{\n      this.loading = false;\n    }}\n  }}\n}}\n",
            descriptor.workspace.name
        ),
        Category::Routing => format!(
            "import {{ routes }} from './routes';\n\nexport class {} {{\n  current = routes[0];\n\n  mount(root: Element) {{\n    root.innerHTML = '<nav></nav>';\n  }}\n\n  navigate(path: string) {{\n    this.current = routes.find((r) => r.path === path) ?? routes[0];\n  }}\n}}\n",
            descriptor.workspace.name
        ),
        Category::ReactiveState => format!(
            "import {{ createStore }} from './store';\n\nexport class {} {{\n  store = createStore({{ count: 0 }});\n\n  mount(root: Element) {{\n    root.innerHTML = '<button></button>';\n  }}\n\n  increment() {{\n    this.store.update((s) => ({{ ...s, count: s.count + 1 }}));\n  }}\n}}\n",
            descriptor.workspace.name
        ),
        Category::Core | Category::Other => format!(
            "export class {} {{\n  mount(root: Element) {{\n    root.innerHTML = '<main></main>';\n  }}\n}}\n",
            descriptor.workspace.name
        ),
    };
    format!("{}{}", banner(descriptor), body)
}

fn category_extra(descriptor: &ChallengeDescriptor) -> Option<(String, String)> {
    let (path, content) = match descriptor.category {
        Category::Forms => (
            "src/app/validators.ts",
            "export function required(value: string): boolean {\n  return value.trim().length > 0;\n}\n\nexport function minLength(value: string, length: number): boolean {\n  return value.length >= length;\n}\n",
        ),
        Category::DataFetching => (
            "src/app/api.ts",
            "export async function fetchJson(url: string): Promise<unknown[]> {\n  const response = await fetch(url);\n  if (!response.ok) {\n    throw new Error(`request failed: ${response.status}`);\n  }\n  return response.json();\n}\n",
        ),
        Category::Routing => (
            "src/app/routes.ts",
            "export interface Route {\n  path: string;\n  title: string;\n}\n\nexport const routes: Route[] = [\n  { path: '/', title: 'Home' },\n  { path: '/about', title: 'About' },\n];\n",
        ),
        Category::ReactiveState => (
            "src/app/store.ts",
            "export function createStore<S>(initial: S) {\n  let state = initial;\n  const listeners = new Set<(s: S) => void>();\n  return {\n    get: () => state,\n    update(fn: (s: S) => S) {\n      state = fn(state);\n      listeners.forEach((l) => l(state));\n    },\n    subscribe(l: (s: S) => void) {\n      listeners.add(l);\n      return () => listeners.delete(l);\n    },\n  };\n}\n",
        ),
        Category::Core | Category::Other => return None,
    };
    Some((path.to_string(), content.to_string()))
}
