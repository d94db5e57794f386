use crate::domain::{AppError, ServiceName};

/// Optional service offered behind a yes/no prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionalService {
    pub service: ServiceName,
    pub prompt: String,
}

/// Bundle of optional services offered together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionalGroup {
    pub name: String,
    pub prompt: String,
    pub members: Vec<ServiceName>,
}

/// Dependency metadata of one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor {
    pub name: ServiceName,
    pub description: Option<String>,
    pub requires: Vec<ServiceName>,
    pub optional_services: Vec<OptionalService>,
    pub optional_groups: Vec<OptionalGroup>,
}

impl ServiceDescriptor {
    /// Descriptor without any dependency metadata.
    pub fn bare(name: ServiceName) -> Self {
        Self {
            name,
            description: None,
            requires: Vec::new(),
            optional_services: Vec::new(),
            optional_groups: Vec::new(),
        }
    }
}

/// Parse the leading `# key: value` comment block of a descriptor.
///
/// Parsing stops at the first line that is neither blank nor a comment, so
/// comments inside the compose body are never interpreted.
pub fn parse_descriptor_header(
    name: &ServiceName,
    content: &str,
) -> Result<ServiceDescriptor, AppError> {
    let mut descriptor = ServiceDescriptor::bare(name.clone());

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some(comment) = line.strip_prefix('#') else {
            break;
        };
        let Some((key, value)) = comment.split_once(':') else {
            continue;
        };
        let value = value.trim();

        match key.trim().to_ascii_lowercase().as_str() {
            "description" => descriptor.description = Some(value.to_string()),
            "requires" => {
                for dep in split_names(value) {
                    let dep = service_name(name, dep)?;
                    if !descriptor.requires.contains(&dep) {
                        descriptor.requires.push(dep);
                    }
                }
            }
            "optional" => descriptor.optional_services.push(parse_optional(name, value)?),
            "optional-group" => descriptor.optional_groups.push(parse_group(name, value)?),
            _ => {}
        }
    }

    Ok(descriptor)
}

fn parse_optional(owner: &ServiceName, value: &str) -> Result<OptionalService, AppError> {
    let (service, prompt) = match value.split_once('|') {
        Some((service, prompt)) => (service.trim(), Some(prompt.trim())),
        None => (value, None),
    };
    let service = service_name(owner, service)?;
    let prompt = match prompt {
        Some(prompt) if !prompt.is_empty() => prompt.to_string(),
        _ => format!("Enable optional service '{}'?", service),
    };
    Ok(OptionalService { service, prompt })
}

fn parse_group(owner: &ServiceName, value: &str) -> Result<OptionalGroup, AppError> {
    let parts: Vec<&str> = value.splitn(3, '|').map(str::trim).collect();
    let [name, prompt, members] = parts.as_slice() else {
        return Err(AppError::InvalidDescriptor {
            service: owner.to_string(),
            reason: format!(
                "optional-group must be '<name> | <prompt> | <members>', got '{}'",
                value
            ),
        });
    };

    let members = split_names(members)
        .map(|member| service_name(owner, member))
        .collect::<Result<Vec<_>, _>>()?;
    if members.is_empty() {
        return Err(AppError::InvalidDescriptor {
            service: owner.to_string(),
            reason: format!("optional-group '{}' has no members", name),
        });
    }

    Ok(OptionalGroup { name: name.to_string(), prompt: prompt.to_string(), members })
}

fn split_names(value: &str) -> impl Iterator<Item = &str> {
    value.split(|c: char| c == ',' || c.is_whitespace()).filter(|s| !s.is_empty())
}

fn service_name(owner: &ServiceName, value: &str) -> Result<ServiceName, AppError> {
    ServiceName::new(value).map_err(|_| AppError::InvalidDescriptor {
        service: owner.to_string(),
        reason: format!("invalid service name '{}'", value),
    })
}
