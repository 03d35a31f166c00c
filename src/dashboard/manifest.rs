use serde_json::json;

use crate::{error::Result, util::slugify};

use super::Flavor;

/// `package.json` of the generated bundle
pub fn package_json(device_name: &str, flavor: Flavor) -> Result<String> {
    let slug = slugify(device_name);
    let name = if slug.is_empty() {
        "esphome-dashboard".to_owned()
    } else {
        format!("{}-dashboard", slug)
    };

    let mut manifest = json!({
        "name": name,
        "version": "1.0.0",
        "private": true,
        "description": format!("REST dashboard for {}", device_name),
        "type": "module"
    });
    match flavor {
        Flavor::JavaScript => {
            manifest["scripts"] = json!({ "serve": "npx serve ." });
        }
        Flavor::TypeScript => {
            manifest["scripts"] = json!({
                "build": "tsc",
                "serve": "tsc && npx serve ."
            });
            manifest["devDependencies"] = json!({ "typescript": "^5.4.0" });
        }
    }

    let mut content = serde_json::to_string_pretty(&manifest)?;
    content.push('\n');
    Ok(content)
}

/// `tsconfig.json` compiling `api.ts` to `api.js` next to `index.html`
pub fn tsconfig_json() -> Result<String> {
    let config = json!({
        "compilerOptions": {
            "target": "ES2020",
            "module": "ES2020",
            "lib": ["ES2020", "DOM"],
            "strict": true,
            "noImplicitAny": true,
            "skipLibCheck": true,
            "rootDir": ".",
            "outDir": "."
        },
        "include": ["api.ts"]
    });

    let mut content = serde_json::to_string_pretty(&config)?;
    content.push('\n');
    Ok(content)
}
