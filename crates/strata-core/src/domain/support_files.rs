//! Container support files emitted next to the solution.
//!
//! Orchestrators parse these structurally, so the bodies are fixed; only the
//! project and service names are substituted.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::RenderContext;

const COMPOSE_TEMPLATE: &str = r#"version: '3.8'

services:
  {{SERVICE_NAME}}:
    build:
      context: .
      dockerfile: Dockerfile
    container_name: {{SERVICE_NAME}}-container
    environment:
      - ASPNETCORE_ENVIRONMENT=Development
      - ASPNETCORE_URLS=http://+:80
    ports:
      - "8000:80"
"#;

const DOCKERFILE_TEMPLATE: &str = r#"FROM mcr.microsoft.com/dotnet/sdk:8.0 AS build
WORKDIR /src

COPY . .
RUN dotnet restore {{PROJECT_NAME}}.sln
RUN dotnet publish {{PROJECT_NAME}}.API/{{PROJECT_NAME}}.API.csproj -c Release -o /app/publish

FROM mcr.microsoft.com/dotnet/aspnet:8.0
WORKDIR /app
COPY --from=build /app/publish .
EXPOSE 80
ENTRYPOINT ["dotnet", "{{PROJECT_NAME}}.API.dll"]
"#;

/// A generated support file, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SupportFile {
    /// Service orchestration descriptor.
    Compose,
    /// Two-stage container build descriptor.
    Dockerfile,
}

impl SupportFile {
    pub const ALL: [SupportFile; 2] = [SupportFile::Compose, SupportFile::Dockerfile];

    pub const fn file_name(&self) -> &'static str {
        match self {
            Self::Compose => "docker-compose.yml",
            Self::Dockerfile => "Dockerfile",
        }
    }

    const fn template(&self) -> &'static str {
        match self {
            Self::Compose => COMPOSE_TEMPLATE,
            Self::Dockerfile => DOCKERFILE_TEMPLATE,
        }
    }

    pub fn path(&self, root: &Path) -> PathBuf {
        root.join(self.file_name())
    }

    pub fn render(&self, ctx: &RenderContext) -> String {
        ctx.render(self.template())
    }
}

impl fmt::Display for SupportFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}
