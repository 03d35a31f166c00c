use crate::error::Result;

use super::Flavor;

const BASE_URL_PLACEHOLDER: &str = "__API_BASE__";

const JAVASCRIPT_CLIENT: &str = r#"// REST API client, generated by esphome-rest-map.

export const API_BASE = __API_BASE__;

export class FetchError extends Error {
  constructor(status, statusText, url) {
    super(`${status} ${statusText} (${url})`);
    this.name = 'FetchError';
    this.status = status;
    this.url = url;
  }
}

async function request(method, path) {
  const url = API_BASE + path;
  const response = await fetch(url, { method });
  if (!response.ok) {
    throw new FetchError(response.status, response.statusText, url);
  }
  return response;
}

export async function getEntity(path) {
  const response = await request('GET', path);
  return response.json();
}

export async function postAction(path, action) {
  await request('POST', `${path}/${action}`);
}

export async function postValue(path, value) {
  await request('POST', `${path}/set?value=${encodeURIComponent(String(value))}`);
}

export async function postTime(path, hour, minute, second) {
  const query = new URLSearchParams({
    hour: String(hour),
    minute: String(minute),
    second: String(second),
  });
  await request('POST', `${path}/set?${query}`);
}
"#;

const TYPESCRIPT_CLIENT: &str = r#"// REST API client, generated by esphome-rest-map.

export const API_BASE: string = __API_BASE__;

export interface EntityState {
  id?: string;
  state?: string | number | boolean;
  value?: string | number | boolean;
  [key: string]: unknown;
}

type Method = 'GET' | 'POST';

export class FetchError extends Error {
  readonly status: number;
  readonly url: string;

  constructor(status: number, statusText: string, url: string) {
    super(`${status} ${statusText} (${url})`);
    this.name = 'FetchError';
    this.status = status;
    this.url = url;
  }
}

async function request(method: Method, path: string): Promise<Response> {
  const url = API_BASE + path;
  const response = await fetch(url, { method });
  if (!response.ok) {
    throw new FetchError(response.status, response.statusText, url);
  }
  return response;
}

export async function getEntity(path: string): Promise<EntityState> {
  const response = await request('GET', path);
  return (await response.json()) as EntityState;
}

export async function postAction(path: string, action: string): Promise<void> {
  await request('POST', `${path}/${action}`);
}

export async function postValue(path: string, value: string | number): Promise<void> {
  await request('POST', `${path}/set?value=${encodeURIComponent(String(value))}`);
}

export async function postTime(
  path: string,
  hour: number,
  minute: number,
  second: number,
): Promise<void> {
  const query = new URLSearchParams({
    hour: String(hour),
    minute: String(minute),
    second: String(second),
  });
  await request('POST', `${path}/set?${query}`);
}
"#;

/// Renders the API client module talking to `base_url`
pub fn render(base_url: &str, flavor: Flavor) -> Result<String> {
    let template = match flavor {
        Flavor::JavaScript => JAVASCRIPT_CLIENT,
        Flavor::TypeScript => TYPESCRIPT_CLIENT,
    };
    // A JSON string is a valid JS string literal
    let base_url = serde_json::to_string(base_url.trim_end_matches('/'))?;
    Ok(template.replace(BASE_URL_PLACEHOLDER, &base_url))
}
