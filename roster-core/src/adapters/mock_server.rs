//! Mock directory server for testing
//!
//! A minimal HTTP server speaking the staff directory backend's dialect, so
//! the client can be exercised without a real deployment:
//! - GET /user/page and /user/admin/page return a bare page count
//! - GET /user/page/{n} and /user/admin/page/{n} return JSON row arrays
//! - GET /user/search/{q} and /user/admin/search/{q} return matching rows,
//!   404 when nothing matches
//! - PATCH /user/employee/{email} and /user/admin/{email} move a user
//!   between the two sets and answer with a JSON boolean
//! - DELETE /user/admin/{email} removes the user
//!
//! The server also records every request line, so tests can assert which
//! endpoints a client actually hit.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use crate::domain::{Role, StaffMember};

/// Mock directory server for testing
pub struct MockDirectoryServer {
    port: u16,
    running: Arc<AtomicBool>,
    thread_handle: Option<thread::JoinHandle<()>>,
    requests: Arc<Mutex<Vec<String>>>,
}

/// Configuration for the mock directory
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Initial employee records
    pub employees: Vec<StaffMember>,
    /// Initial admin records
    pub admins: Vec<StaffMember>,
    /// Rows per page
    pub page_size: usize,
    /// Respond 500 to every request
    pub fail_server: bool,
    /// Answer role toggles with `false`
    pub decline_toggles: bool,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            employees: sample_staff(6, Role::Employee),
            admins: sample_staff(2, Role::Admin),
            page_size: 4,
            fail_server: false,
            decline_toggles: false,
        }
    }
}

/// Generate deterministic staff records for tests
pub fn sample_staff(count: usize, role: Role) -> Vec<StaffMember> {
    let names = [
        "alice", "bob", "carol", "dave", "erin", "frank", "grace", "heidi", "ivan", "judy",
    ];

    (0..count)
        .map(|i| {
            let name = names[i % names.len()];
            StaffMember::new(
                format!("{}{}", name, i),
                format!("{}{}@corp.test", name, i),
                role,
            )
        })
        .collect()
}

/// The mutable directory behind the endpoints
struct DirectoryState {
    employees: Vec<StaffMember>,
    admins: Vec<StaffMember>,
}

impl MockDirectoryServer {
    /// Start a new mock server on a random available port
    pub fn start(config: MockConfig) -> std::io::Result<Self> {
        Self::start_on_port(0, config)
    }

    /// Start mock server on a specific port (0 for random)
    pub fn start_on_port(port: u16, config: MockConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind(format!("127.0.0.1:{}", port))?;
        let actual_port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();

        let state = Arc::new(Mutex::new(DirectoryState {
            employees: config.employees.clone(),
            admins: config.admins.clone(),
        }));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let requests_clone = requests.clone();

        // Set listener to non-blocking for graceful shutdown
        listener.set_nonblocking(true)?;

        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let cfg = config.clone();
                        let state = state.clone();
                        let requests = requests_clone.clone();
                        thread::spawn(move || {
                            handle_connection(stream, &cfg, &state, &requests);
                        });
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        // No connection available, sleep briefly
                        thread::sleep(std::time::Duration::from_millis(10));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port: actual_port,
            running,
            thread_handle: Some(thread_handle),
            requests,
        })
    }

    /// Get the port the server is listening on
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Get the base URL for this mock server
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Request lines received so far, as "METHOD /path"
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockDirectoryServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn handle_connection(
    mut stream: TcpStream,
    config: &MockConfig,
    state: &Mutex<DirectoryState>,
    requests: &Mutex<Vec<String>>,
) {
    let mut buffer = [0; 4096];

    if let Ok(n) = stream.read(&mut buffer) {
        let request = String::from_utf8_lossy(&buffer[..n]);

        // Parse request line
        let first_line = request.lines().next().unwrap_or("");
        let parts: Vec<&str> = first_line.split_whitespace().collect();

        if parts.len() < 2 {
            send_response(&mut stream, 400, "Bad Request", r#"{"error": "Invalid request"}"#);
            return;
        }

        let method = parts[0];
        let path = parts[1];

        requests.lock().unwrap().push(format!("{} {}", method, path));

        if config.fail_server {
            send_response(
                &mut stream,
                500,
                "Internal Server Error",
                r#"{"error": "Internal server error"}"#,
            );
            return;
        }

        let path_without_query = path.split('?').next().unwrap_or(path);
        let decoded: Vec<String> = path_without_query
            .trim_start_matches('/')
            .split('/')
            .map(percent_decode)
            .collect();
        let segments: Vec<&str> = decoded.iter().map(String::as_str).collect();

        let mut state = state.lock().unwrap();

        match (method, segments.as_slice()) {
            ("GET", ["user", "page"]) => {
                let count = state.employees.len().div_ceil(config.page_size);
                send_response(&mut stream, 200, "OK", &count.to_string());
            }
            ("GET", ["user", "page", index]) => {
                send_page(&mut stream, &state.employees, index, config.page_size);
            }
            ("GET", ["user", "search", query]) => {
                send_search(&mut stream, &state.employees, query);
            }
            ("GET", ["user", "admin", "page"]) => {
                let count = state.admins.len().div_ceil(config.page_size);
                send_response(&mut stream, 200, "OK", &count.to_string());
            }
            ("GET", ["user", "admin", "page", index]) => {
                send_page(&mut stream, &state.admins, index, config.page_size);
            }
            ("GET", ["user", "admin", "search", query]) => {
                send_search(&mut stream, &state.admins, query);
            }
            ("PATCH", ["user", "employee", email]) => {
                if config.decline_toggles {
                    send_response(&mut stream, 200, "OK", "false");
                } else if let Some(pos) = position_of(&state.employees, email) {
                    let mut member = state.employees.remove(pos);
                    member.role = Role::Admin;
                    state.admins.push(member);
                    send_response(&mut stream, 200, "OK", "true");
                } else {
                    send_response(&mut stream, 404, "Not Found", r#"{"error": "User not found"}"#);
                }
            }
            ("PATCH", ["user", "admin", email]) => {
                if config.decline_toggles {
                    send_response(&mut stream, 200, "OK", "false");
                } else if let Some(pos) = position_of(&state.admins, email) {
                    let mut member = state.admins.remove(pos);
                    member.role = Role::Employee;
                    state.employees.push(member);
                    send_response(&mut stream, 200, "OK", "true");
                } else {
                    send_response(&mut stream, 404, "Not Found", r#"{"error": "User not found"}"#);
                }
            }
            ("DELETE", ["user", "admin", email]) => {
                let before = state.employees.len() + state.admins.len();
                let email = email.to_string();
                state.employees.retain(|m| m.email != email);
                state.admins.retain(|m| m.email != email);
                if state.employees.len() + state.admins.len() < before {
                    send_response(&mut stream, 200, "OK", "true");
                } else {
                    send_response(&mut stream, 404, "Not Found", r#"{"error": "User not found"}"#);
                }
            }
            _ => {
                send_response(&mut stream, 404, "Not Found", r#"{"error": "Endpoint not found"}"#);
            }
        }
    }
}

fn send_page(stream: &mut TcpStream, list: &[StaffMember], index: &str, page_size: usize) {
    let Ok(index) = index.parse::<usize>() else {
        send_response(stream, 400, "Bad Request", r#"{"error": "Invalid page index"}"#);
        return;
    };

    let rows: Vec<&StaffMember> = list.iter().skip(index * page_size).take(page_size).collect();
    let json = serde_json::to_string(&rows).unwrap();
    send_response(stream, 200, "OK", &json);
}

fn send_search(stream: &mut TcpStream, list: &[StaffMember], query: &str) {
    let q = query.to_lowercase();
    let rows: Vec<&StaffMember> = list
        .iter()
        .filter(|m| m.username.to_lowercase().contains(&q) || m.email.to_lowercase().contains(&q))
        .collect();

    if rows.is_empty() {
        send_response(stream, 404, "Not Found", r#"{"error": "No users found"}"#);
    } else {
        let json = serde_json::to_string(&rows).unwrap();
        send_response(stream, 200, "OK", &json);
    }
}

fn position_of(list: &[StaffMember], email: &str) -> Option<usize> {
    list.iter().position(|m| m.email == email)
}

fn send_response(stream: &mut TcpStream, status: u16, status_text: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        status_text,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

/// Decode %XX escapes in a path segment
fn percent_decode(segment: &str) -> String {
    fn hex_val(b: u8) -> Option<u8> {
        match b {
            b'0'..=b'9' => Some(b - b'0'),
            b'a'..=b'f' => Some(b - b'a' + 10),
            b'A'..=b'F' => Some(b - b'A' + 10),
            _ => None,
        }
    }

    let bytes = segment.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_val(bytes[i + 1]), hex_val(bytes[i + 2])) {
                out.push(hi * 16 + lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::rest::DirectoryClient;
    use crate::domain::Scope;
    use crate::ports::DirectoryProvider;

    fn client_for(server: &MockDirectoryServer) -> DirectoryClient {
        DirectoryClient::new(&server.base_url()).unwrap()
    }

    #[test]
    fn test_mock_server_starts() {
        let server = MockDirectoryServer::start(MockConfig::default()).unwrap();
        assert!(server.port() > 0);
    }

    #[test]
    fn test_fetch_pages_and_count() {
        let server = MockDirectoryServer::start(MockConfig {
            employees: sample_staff(10, Role::Employee),
            page_size: 4,
            ..Default::default()
        })
        .unwrap();
        let client = client_for(&server);

        assert_eq!(client.page_count(Scope::Employees).unwrap(), 3);

        let first = client.fetch_page(Scope::Employees, 0).unwrap();
        assert_eq!(first.len(), 4);
        assert_eq!(first[0].username, "alice0");
        assert_eq!(first[0].role, Role::Employee);

        let last = client.fetch_page(Scope::Employees, 2).unwrap();
        assert_eq!(last.len(), 2);
    }

    #[test]
    fn test_admin_scope_uses_admin_endpoints() {
        let server = MockDirectoryServer::start(MockConfig {
            employees: sample_staff(5, Role::Employee),
            admins: sample_staff(3, Role::Admin),
            ..Default::default()
        })
        .unwrap();
        let client = client_for(&server);

        assert_eq!(client.page_count(Scope::Admins).unwrap(), 1);
        let admins = client.fetch_page(Scope::Admins, 0).unwrap();
        assert_eq!(admins.len(), 3);
        assert!(admins.iter().all(|m| m.role.is_admin()));

        let requests = server.requests();
        assert!(requests.iter().any(|r| r == "GET /user/admin/page"));
        assert!(requests.iter().any(|r| r == "GET /user/admin/page/0"));
    }

    #[test]
    fn test_search_covers_the_whole_scope() {
        // More rows than one page, so a paged search would miss some
        let server = MockDirectoryServer::start(MockConfig {
            employees: sample_staff(10, Role::Employee),
            page_size: 4,
            ..Default::default()
        })
        .unwrap();
        let client = client_for(&server);

        let all = client.search(Scope::Employees, "corp.test").unwrap();
        assert_eq!(all.len(), 10);

        let one = client.search(Scope::Employees, "bob1").unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].email, "bob1@corp.test");
    }

    #[test]
    fn test_search_without_matches_is_empty_not_error() {
        let server = MockDirectoryServer::start(MockConfig::default()).unwrap();
        let client = client_for(&server);

        let rows = client.search(Scope::Employees, "zzz").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_search_query_is_percent_encoded() {
        let server = MockDirectoryServer::start(MockConfig::default()).unwrap();
        let client = client_for(&server);

        let _ = client.search(Scope::Employees, "alice smith").unwrap();

        let requests = server.requests();
        assert!(
            requests.iter().any(|r| r == "GET /user/search/alice%20smith"),
            "got: {:?}",
            requests
        );
    }

    #[test]
    fn test_promote_moves_employee_to_admins() {
        let server = MockDirectoryServer::start(MockConfig {
            employees: sample_staff(5, Role::Employee),
            admins: Vec::new(),
            ..Default::default()
        })
        .unwrap();
        let client = client_for(&server);

        client.toggle_role(Scope::Employees, "bob1@corp.test").unwrap();

        let admins = client.fetch_page(Scope::Admins, 0).unwrap();
        assert_eq!(admins.len(), 1);
        assert_eq!(admins[0].email, "bob1@corp.test");
        assert!(admins[0].role.is_admin());

        assert!(client.search(Scope::Employees, "bob1").unwrap().is_empty());
        assert!(server
            .requests()
            .iter()
            .any(|r| r == "PATCH /user/employee/bob1@corp.test"));
    }

    #[test]
    fn test_demote_moves_admin_to_employees() {
        let server = MockDirectoryServer::start(MockConfig {
            employees: Vec::new(),
            admins: sample_staff(2, Role::Admin),
            ..Default::default()
        })
        .unwrap();
        let client = client_for(&server);

        client.toggle_role(Scope::Admins, "alice0@corp.test").unwrap();

        assert_eq!(client.page_count(Scope::Admins).unwrap(), 1);
        let employees = client.fetch_page(Scope::Employees, 0).unwrap();
        assert_eq!(employees.len(), 1);
        assert_eq!(employees[0].role, Role::Employee);

        assert!(server
            .requests()
            .iter()
            .any(|r| r == "PATCH /user/admin/alice0@corp.test"));
    }

    #[test]
    fn test_declined_toggle_is_an_api_error() {
        let server = MockDirectoryServer::start(MockConfig {
            decline_toggles: true,
            ..Default::default()
        })
        .unwrap();
        let client = client_for(&server);

        let result = client.toggle_role(Scope::Employees, "alice0@corp.test");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("declined"));
    }

    #[test]
    fn test_toggle_unknown_user_is_not_found() {
        let server = MockDirectoryServer::start(MockConfig::default()).unwrap();
        let client = client_for(&server);

        let result = client.toggle_role(Scope::Employees, "ghost@corp.test");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_delete_removes_user() {
        let server = MockDirectoryServer::start(MockConfig {
            employees: sample_staff(5, Role::Employee),
            ..Default::default()
        })
        .unwrap();
        let client = client_for(&server);

        client.delete_user("carol2@corp.test").unwrap();
        assert!(client.search(Scope::Employees, "carol2").unwrap().is_empty());

        // Deleting again reports not found
        let result = client.delete_user("carol2@corp.test");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));

        assert!(server
            .requests()
            .iter()
            .any(|r| r == "DELETE /user/admin/carol2@corp.test"));
    }

    #[test]
    fn test_server_failure_maps_to_api_error() {
        let server = MockDirectoryServer::start(MockConfig {
            fail_server: true,
            ..Default::default()
        })
        .unwrap();
        let client = client_for(&server);

        let result = client.page_count(Scope::Employees);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("HTTP 500"));
    }
}
